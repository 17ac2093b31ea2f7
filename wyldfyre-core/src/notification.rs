//! Push payload and notification option types.
//!
//! `PushPayload` mirrors what the push service delivers (everything
//! optional, server-defined). `NotificationOptions` is what the worker
//! hands to the platform notification surface; the rich fields (`vibrate`,
//! `image`, `actions`) are `Option`s that stay `None` on iOS, and are
//! skipped entirely during serialization when absent so an iOS options
//! object never carries the keys at all.

use crate::enums::PushKind;
use serde::{Deserialize, Serialize};

/// Inbound push message body, as sent by the notification service.
///
/// Field names are camelCase on the wire, matching the web push conventions
/// the notification service follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tag: Option<String>,
    pub renotify: Option<bool>,
    pub require_interaction: Option<bool>,
    pub silent: Option<bool>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<PushKind>,
    pub conversation_id: Option<String>,
    pub agent_name: Option<String>,
    pub vibrate: Option<Vec<u32>>,
    pub image: Option<String>,
    pub actions: Option<Vec<NotificationAction>>,
}

/// A button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Action identifier reported back on click (`reply`, `view`, `dismiss`).
    pub action: String,
    /// Button label shown to the user.
    pub title: String,
}

impl NotificationAction {
    pub fn new(action: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            title: title.into(),
        }
    }
}

/// Data bag carried on a displayed notification and echoed on click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationData {
    /// Target URL to open or focus when the notification is clicked.
    pub url: String,
    /// Epoch milliseconds at build time.
    pub timestamp: i64,
    pub kind: PushKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
}

impl Default for NotificationData {
    fn default() -> Self {
        Self {
            url: "/".to_string(),
            timestamp: 0,
            kind: PushKind::Generic,
            conversation_id: None,
            agent_name: None,
        }
    }
}

/// Fully-resolved options for displaying one notification.
///
/// All fields default so that client-supplied options (the
/// `SHOW_NOTIFICATION` message) may be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub renotify: bool,
    pub require_interaction: bool,
    pub silent: bool,
    pub data: NotificationData,
    /// Vibration pattern; never populated on iOS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrate: Option<Vec<u32>>,
    /// Large inline image; never populated on iOS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Action buttons; never populated on iOS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<NotificationAction>>,
}

impl NotificationOptions {
    /// True when no rich (non-iOS) field is populated.
    pub fn is_platform_lean(&self) -> bool {
        self.vibrate.is_none() && self.image.is_none() && self.actions.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_payload_all_fields_optional() {
        let payload: PushPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload, PushPayload::default());
    }

    #[test]
    fn test_push_payload_type_field_rename() {
        let payload: PushPayload =
            serde_json::from_str(r#"{"type":"message","title":"Hi"}"#).unwrap();
        assert_eq!(payload.kind, Some(PushKind::Message));
        assert_eq!(payload.title.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_lean_options_serialize_without_rich_keys() {
        let options = NotificationOptions {
            body: "Agent finished".to_string(),
            icon: "/icons/icon-192.png".to_string(),
            badge: "/icons/badge-72.png".to_string(),
            tag: "wyld-fyre".to_string(),
            renotify: true,
            require_interaction: false,
            silent: false,
            data: NotificationData {
                url: "/".to_string(),
                timestamp: 0,
                kind: PushKind::Generic,
                conversation_id: None,
                agent_name: None,
            },
            vibrate: None,
            image: None,
            actions: None,
        };
        assert!(options.is_platform_lean());

        let json = serde_json::to_string(&options).unwrap();
        assert!(!json.contains("vibrate"));
        assert!(!json.contains("image"));
        assert!(!json.contains("actions"));
    }
}
