//! Worker message protocol.
//!
//! Clients talk to the worker with structured-clone objects dispatched on a
//! `type` tag; the worker answers reply-port messages and pushes
//! `NOTIFICATION_CLICK` messages back at clients. Tags and payload keys
//! match the protocol the dashboard already speaks.

use serde::{Deserialize, Serialize};
use wyldfyre_core::NotificationOptions;

/// Inbound messages from a controlled client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerMessage {
    /// Activate the waiting worker immediately.
    #[serde(rename = "SKIP_WAITING")]
    SkipWaiting,

    /// Report the client platform; gates rich notification fields.
    #[serde(rename = "SET_PLATFORM")]
    SetPlatform {
        #[serde(rename = "isIOS", default)]
        is_ios: bool,
        #[serde(rename = "isAndroid", default)]
        is_android: bool,
    },

    /// Best-effort add of URLs to the current cache generation.
    #[serde(rename = "CACHE_URLS")]
    CacheUrls { urls: Vec<String> },

    /// Delete the current cache generation wholesale.
    #[serde(rename = "CLEAR_CACHE")]
    ClearCache,

    /// Reply with the current cache name (reply port).
    #[serde(rename = "GET_VERSION")]
    GetVersion,

    /// Display a notification on behalf of the client.
    #[serde(rename = "SHOW_NOTIFICATION")]
    ShowNotification { notification: NotificationRequest },

    /// Consume and reply with pending shared content (reply port).
    #[serde(rename = "GET_SHARED_CONTENT")]
    GetSharedContent,

    /// Set or clear the OS app-icon badge.
    #[serde(rename = "UPDATE_BADGE")]
    UpdateBadge { count: u32 },
}

/// Payload of a `SHOW_NOTIFICATION` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    /// Partial options; anything omitted falls back to defaults.
    #[serde(default)]
    pub options: NotificationOptions,
}

/// Replies sent back over a message's reply port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageReply {
    Version { version: String },
    SharedContent { content: Option<String> },
}

/// Outbound messages the worker posts to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// A notification was clicked; the receiving client should handle it.
    #[serde(rename = "NOTIFICATION_CLICK")]
    NotificationClick {
        /// Resolved target URL.
        url: String,
        /// The action button pressed, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<String>,
        /// Present when the receiving client must navigate itself there.
        #[serde(skip_serializing_if = "Option::is_none")]
        navigate: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_tags_round_trip() {
        let msg: WorkerMessage = serde_json::from_str(r#"{"type":"SKIP_WAITING"}"#).unwrap();
        assert_eq!(msg, WorkerMessage::SkipWaiting);

        let msg: WorkerMessage =
            serde_json::from_str(r#"{"type":"SET_PLATFORM","isIOS":true,"isAndroid":false}"#)
                .unwrap();
        assert_eq!(
            msg,
            WorkerMessage::SetPlatform {
                is_ios: true,
                is_android: false
            }
        );

        let msg: WorkerMessage =
            serde_json::from_str(r#"{"type":"CACHE_URLS","urls":["/a","/b"]}"#).unwrap();
        assert_eq!(
            msg,
            WorkerMessage::CacheUrls {
                urls: vec!["/a".to_string(), "/b".to_string()]
            }
        );

        let msg: WorkerMessage =
            serde_json::from_str(r#"{"type":"UPDATE_BADGE","count":3}"#).unwrap();
        assert_eq!(msg, WorkerMessage::UpdateBadge { count: 3 });
    }

    #[test]
    fn test_show_notification_accepts_partial_options() {
        let msg: WorkerMessage = serde_json::from_str(
            r#"{"type":"SHOW_NOTIFICATION","notification":{"title":"Hi","options":{"body":"there"}}}"#,
        )
        .unwrap();
        match msg {
            WorkerMessage::ShowNotification { notification } => {
                assert_eq!(notification.title, "Hi");
                assert_eq!(notification.options.body, "there");
                assert_eq!(notification.options.data.url, "/");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_version_reply_shape() {
        let reply = MessageReply::Version {
            version: "wyld-fyre-v17".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&reply).unwrap(),
            r#"{"version":"wyld-fyre-v17"}"#
        );
    }

    #[test]
    fn test_shared_content_reply_null_when_absent() {
        let reply = MessageReply::SharedContent { content: None };
        assert_eq!(serde_json::to_string(&reply).unwrap(), r#"{"content":null}"#);
    }

    #[test]
    fn test_notification_click_omits_absent_fields() {
        let msg = ClientMessage::NotificationClick {
            url: "/chat/abc".to_string(),
            action: None,
            navigate: None,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"NOTIFICATION_CLICK","url":"/chat/abc"}"#);
    }
}
