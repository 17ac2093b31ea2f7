//! Error types for Wyld Fyre worker operations

use thiserror::Error;

/// Cache layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Install failed: essential asset {url} could not be precached: {reason}")]
    InstallFailed { url: String, reason: String },

    #[error("Cache namespace not found: {namespace}")]
    NamespaceNotFound { namespace: String },

    #[error("Cache read failed for {url}: {reason}")]
    ReadFailed { url: String, reason: String },

    #[error("Cache write failed for {url}: {reason}")]
    WriteFailed { url: String, reason: String },

    #[error("Cache backend unavailable: {reason}")]
    BackendUnavailable { reason: String },
}

/// Request routing errors.
///
/// Most routing failures are not errors at all - a failed network fetch is
/// resolved through the cache/offline fallback chain. These variants cover
/// the cases where a handler itself cannot proceed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Network fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Malformed protocol URL: {raw}")]
    MalformedProtocolUrl { raw: String },

    #[error("Malformed share payload: {reason}")]
    MalformedSharePayload { reason: String },
}

/// Notification handling errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Notification display failed: {reason}")]
    DisplayFailed { reason: String },

    #[error("Client dispatch failed for {url}: {reason}")]
    DispatchFailed { url: String, reason: String },

    #[error("Window open failed for {url}: {reason}")]
    OpenFailed { url: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Wyld Fyre worker errors.
#[derive(Debug, Clone, Error)]
pub enum WyldError {
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Wyld Fyre worker operations.
pub type WyldResult<T> = Result<T, WyldError>;
