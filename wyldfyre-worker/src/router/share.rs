//! Share-target intake.
//!
//! The OS share sheet POSTs `multipart/form-data` fields `title`, `text`,
//! and `url` to the fixed share path. Non-empty fields are joined with
//! newlines, stored for the chat page to pick up, and the user is
//! redirected into chat with a query flag.

use bytes::Bytes;
use tracing::{debug, warn};
use wyldfyre_core::{RequestSnapshot, ResponseSnapshot, WorkerConfig};

use crate::shared::SharedContentStore;

const SHARE_FIELDS: [&str; 3] = ["title", "text", "url"];

/// Handle a share-target POST. Always redirects into chat, even when the
/// payload could not be parsed - losing a malformed share must not strand
/// the user on a blank POST endpoint.
pub(crate) async fn handle_share(
    request: &RequestSnapshot,
    shared: &SharedContentStore,
    config: &WorkerConfig,
) -> ResponseSnapshot {
    match extract_share_content(request).await {
        Ok(Some(content)) => {
            debug!(bytes = content.len(), "Stored shared content");
            shared.store(content).await;
        }
        Ok(None) => {
            debug!("Share payload had no non-empty fields");
        }
        Err(reason) => {
            warn!(reason = %reason, "Malformed share payload dropped");
        }
    }

    ResponseSnapshot::see_other(format!("{}?shared=true", config.chat_url))
}

/// Pull `title`/`text`/`url` out of the POST body and join the non-empty
/// ones with newlines, preserving the fixed field order.
async fn extract_share_content(request: &RequestSnapshot) -> Result<Option<String>, String> {
    let fields = match request
        .header("content-type")
        .and_then(|ct| multer::parse_boundary(ct).ok())
    {
        Some(boundary) => parse_multipart(request.body.clone(), boundary).await?,
        // Default form enctype; also what some share sheets send.
        None => parse_urlencoded(&request.body),
    };

    let joined: Vec<String> = SHARE_FIELDS
        .iter()
        .filter_map(|name| {
            fields
                .iter()
                .find(|(field, value)| field == name && !value.is_empty())
                .map(|(_, value)| value.clone())
        })
        .collect();

    if joined.is_empty() {
        Ok(None)
    } else {
        Ok(Some(joined.join("\n")))
    }
}

async fn parse_multipart(
    body: Vec<u8>,
    boundary: String,
) -> Result<Vec<(String, String)>, String> {
    let stream = futures_util::stream::once(async move {
        Ok::<Bytes, std::convert::Infallible>(Bytes::from(body))
    });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if SHARE_FIELDS.contains(&name.as_str()) {
            let value = field.text().await.map_err(|e| e.to_string())?;
            fields.push((name, value));
        }
    }
    Ok(fields)
}

fn parse_urlencoded(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
