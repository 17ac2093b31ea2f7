//! Wyld Fyre Worker
//!
//! The service-worker-shaped core of the Wyld Fyre dashboard, embeddable in
//! any async host:
//!
//! - `cache` - versioned cache store with install/activate lifecycle
//! - `router` - ordered fetch-interception route table (share-target,
//!   protocol-handler, bypass rules, network-first with offline fallback)
//! - `notify` - push payload to platform-gated notification options, and
//!   notification-click dispatch back into open clients
//! - `shared` - read-once share-target content store with a freshness window
//! - `messages` - the structured message protocol clients speak to the worker
//! - `runtime` - event dispatch tying the above together
//!
//! The host supplies three seams: a [`cache::CacheBackend`], a
//! [`fetcher::NetworkFetcher`], and a [`notify::ClientRegistry`]. Everything
//! else is pure library code driven by [`wyldfyre_core::WorkerConfig`].

pub mod cache;
pub mod fetcher;
pub mod messages;
pub mod notify;
pub mod router;
pub mod runtime;
pub mod shared;

pub use cache::{CacheBackend, CacheStats, CacheStore, MemoryCacheBackend};
pub use fetcher::{HttpFetcher, NetworkFetcher};
pub use messages::{ClientMessage, MessageReply, WorkerMessage};
pub use notify::{build_notification, ClientHandle, ClientRegistry};
pub use router::{Route, RouteOutcome, Router};
pub use runtime::{ServiceWorker, WorkerLifecycle};
pub use shared::SharedContentStore;
