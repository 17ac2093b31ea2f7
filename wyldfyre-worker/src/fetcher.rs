//! Network fetcher seam.
//!
//! The router and cache store never talk to the network directly; they go
//! through [`NetworkFetcher`] so tests can swap in scripted fetchers.

use async_trait::async_trait;
use wyldfyre_core::{HttpMethod, RequestSnapshot, ResponseSnapshot, RouteError};

/// Performs one HTTP request on behalf of the worker.
#[async_trait]
pub trait NetworkFetcher: Send + Sync {
    /// Execute the request. A transport-level failure (offline, DNS, reset)
    /// is a `RouteError::FetchFailed`; a non-2xx status is NOT an error and
    /// comes back as a normal snapshot.
    async fn fetch(&self, request: &RequestSnapshot) -> Result<ResponseSnapshot, RouteError>;
}

/// Reqwest-backed fetcher.
///
/// Rooted URLs (`/offline.html`) are resolved against the configured
/// origin; absolute URLs pass through untouched.
pub struct HttpFetcher {
    client: reqwest::Client,
    origin: String,
}

impl HttpFetcher {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_client(client: reqwest::Client, origin: impl Into<String>) -> Self {
        Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.origin, url)
        } else {
            url.to_string()
        }
    }
}

#[async_trait]
impl NetworkFetcher for HttpFetcher {
    async fn fetch(&self, request: &RequestSnapshot) -> Result<ResponseSnapshot, RouteError> {
        let url = self.resolve(&request.url);
        let mut builder = match &request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url).body(request.body.clone()),
            HttpMethod::Other(m) => {
                let method = reqwest::Method::from_bytes(m.as_bytes()).map_err(|e| {
                    RouteError::FetchFailed {
                        url: url.clone(),
                        reason: e.to_string(),
                    }
                })?;
                self.client.request(method, &url).body(request.body.clone())
            }
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| RouteError::FetchFailed {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| RouteError::FetchFailed {
                url,
                reason: e.to_string(),
            })?
            .to_vec();

        Ok(ResponseSnapshot {
            status,
            headers,
            body,
        })
    }
}
