//! Custom-protocol handler redirects.
//!
//! The PWA registers `web+wyldfyre` as a protocol handler; the browser
//! turns `web+wyldfyre://...` links into a GET against the app origin with
//! the original URL in a query parameter. The worker resolves that URL to
//! an in-app path and answers with a 303 redirect.

use tracing::error;
use wyldfyre_core::{RequestSnapshot, ResponseSnapshot, RouteError, WorkerConfig};

/// Extract the raw protocol URL from the request's query string, if the
/// registered parameter is present and carries our scheme.
pub(crate) fn protocol_url_from_query(raw_url: &str, config: &WorkerConfig) -> Option<String> {
    let query = raw_url.split_once('?')?.1;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| *key == config.protocol_param && value.starts_with(&config.protocol_scheme))
        .map(|(_, value)| value.into_owned())
}

/// Handle a protocol-handler GET. Returns `None` when the carried URL is
/// malformed, in which case the request falls through unhandled.
pub(crate) fn handle_protocol(
    request: &RequestSnapshot,
    config: &WorkerConfig,
) -> Option<ResponseSnapshot> {
    let raw = protocol_url_from_query(&request.url, config)?;
    match resolve_protocol_url(&raw, config) {
        Ok(target) => Some(ResponseSnapshot::see_other(target)),
        Err(e) => {
            error!(error = %e, "Failed to resolve protocol URL");
            None
        }
    }
}

/// Map a `web+wyldfyre://...` URL onto an in-app path:
/// - `/chat/...` passes through
/// - `/agent/...` is rewritten to `/agents/...`
/// - `/new` opens a fresh chat
/// - anything else lands on the root page
pub(crate) fn resolve_protocol_url(raw: &str, config: &WorkerConfig) -> Result<String, RouteError> {
    let malformed = || RouteError::MalformedProtocolUrl {
        raw: raw.to_string(),
    };

    let with_slashes = format!("{}://", config.protocol_scheme);
    let bare = format!("{}:", config.protocol_scheme);
    let rest = raw
        .strip_prefix(&with_slashes)
        .or_else(|| raw.strip_prefix(&bare))
        .ok_or_else(malformed)?;

    if rest.contains(char::is_whitespace) {
        return Err(malformed());
    }

    let path = format!("/{}", rest.trim_start_matches('/'));

    Ok(if path == "/new" {
        format!("{}?new=true", config.chat_url)
    } else if path == "/chat" || path.starts_with("/chat/") {
        path
    } else if let Some(agent) = path.strip_prefix("/agent/") {
        format!("/agents/{}", agent)
    } else {
        "/".to_string()
    })
}
