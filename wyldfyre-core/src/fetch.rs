//! Request/response snapshot types for the fetch interception point.
//!
//! These are deliberately plain value types: the router and cache layers
//! operate on snapshots rather than live connection objects so that every
//! routing decision is testable without a network.

use crate::enums::HttpMethod;
use serde::{Deserialize, Serialize};

/// A single HTTP request as observed by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub method: HttpMethod,
    /// Full request URL, including scheme and query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// True when the request is a top-level page navigation, which makes it
    /// eligible for the offline-page fallback.
    pub is_navigation: bool,
}

impl RequestSnapshot {
    /// A plain GET for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
            is_navigation: false,
        }
    }

    /// A page navigation GET for the given URL.
    pub fn navigation(url: impl Into<String>) -> Self {
        Self {
            is_navigation: true,
            ..Self::get(url)
        }
    }

    /// A POST with the given body.
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body,
            is_navigation: false,
        }
    }

    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A stored or in-flight HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ResponseSnapshot {
    /// A 200 response with the given body.
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body,
        }
    }

    /// A 303 See Other redirect to `location`.
    pub fn see_other(location: impl Into<String>) -> Self {
        Self {
            status: 303,
            headers: vec![("Location".to_string(), location.into())],
            body: Vec::new(),
        }
    }

    /// The synthesized offline response returned when the network is down
    /// and every cache fallback is absent.
    pub fn service_unavailable() -> Self {
        Self {
            status: 503,
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: b"Service Unavailable".to_vec(),
        }
    }

    /// Only successful 200 responses are eligible for write-through caching.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200
    }

    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
