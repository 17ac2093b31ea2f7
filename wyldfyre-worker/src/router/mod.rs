//! Fetch-interception request router.
//!
//! Routing is one explicit ordered table: each [`Route`] has a predicate,
//! the first match wins, and the matched handler either produces a response
//! or declines so the request passes through to normal browser networking.

mod network;
mod protocol;
mod share;

use std::sync::Arc;

use wyldfyre_core::{RequestSnapshot, ResponseSnapshot, WorkerConfig, WyldResult};

use crate::cache::{CacheBackend, CacheStore};
use crate::fetcher::NetworkFetcher;
use crate::shared::SharedContentStore;

/// The routes, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// POST from the OS share sheet to the fixed share path.
    ShareTarget,
    /// GET carrying a registered custom-protocol URL in its query string.
    ProtocolHandler,
    /// Traffic the worker must never intercept: non-GET methods, live API
    /// calls, WebSocket upgrades, non-http schemes.
    Bypass,
    /// Everything else: network-first with cache fallback.
    NetworkFirst,
}

/// Evaluation order; [`Route::NetworkFirst`] is the catch-all.
pub const ROUTE_ORDER: [Route; 4] = [
    Route::ShareTarget,
    Route::ProtocolHandler,
    Route::Bypass,
    Route::NetworkFirst,
];

impl Route {
    /// Whether this route claims the request.
    pub fn matches(&self, request: &RequestSnapshot, config: &WorkerConfig) -> bool {
        match self {
            Route::ShareTarget => {
                request.method.is_post() && url_path(&request.url) == config.share_path
            }
            Route::ProtocolHandler => {
                request.method.is_get()
                    && protocol::protocol_url_from_query(&request.url, config).is_some()
            }
            Route::Bypass => {
                !request.method.is_get()
                    || request.url.contains(&config.api_marker)
                    || request.url.starts_with("ws://")
                    || request.url.starts_with("wss://")
                    || !request.url.starts_with("http")
            }
            Route::NetworkFirst => true,
        }
    }
}

/// Outcome of routing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The worker answers the request with this response.
    Response(ResponseSnapshot),
    /// The worker declines; the browser networks the request normally.
    Unhandled,
}

/// Path component of a request URL, tolerating already-relative URLs.
pub(crate) fn url_path(raw: &str) -> String {
    if let Ok(parsed) = url::Url::parse(raw) {
        return parsed.path().to_string();
    }
    raw.split('?').next().unwrap_or("").to_string()
}

/// Per-request router over an ordered route table.
pub struct Router<B: CacheBackend, F: NetworkFetcher> {
    config: WorkerConfig,
    store: CacheStore<B>,
    fetcher: Arc<F>,
    shared: Arc<SharedContentStore>,
}

impl<B, F> Router<B, F>
where
    B: CacheBackend + 'static,
    F: NetworkFetcher,
{
    pub fn new(
        config: WorkerConfig,
        store: CacheStore<B>,
        fetcher: Arc<F>,
        shared: Arc<SharedContentStore>,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
            shared,
        }
    }

    /// Which route claims this request. Exposed so ordering is testable.
    pub fn route_for(&self, request: &RequestSnapshot) -> Route {
        ROUTE_ORDER
            .into_iter()
            .find(|route| route.matches(request, &self.config))
            .unwrap_or(Route::NetworkFirst)
    }

    /// Route one request to a response, or decline it.
    pub async fn handle(&self, request: &RequestSnapshot) -> WyldResult<RouteOutcome> {
        match self.route_for(request) {
            Route::ShareTarget => Ok(RouteOutcome::Response(
                share::handle_share(request, &self.shared, &self.config).await,
            )),
            Route::ProtocolHandler => {
                match protocol::handle_protocol(request, &self.config) {
                    Some(response) => Ok(RouteOutcome::Response(response)),
                    // Malformed protocol URL: logged inside, falls through.
                    None => Ok(RouteOutcome::Unhandled),
                }
            }
            Route::Bypass => Ok(RouteOutcome::Unhandled),
            Route::NetworkFirst => Ok(RouteOutcome::Response(
                network::network_first(request, &self.store, self.fetcher.as_ref(), &self.config)
                    .await?,
            )),
        }
    }
}
