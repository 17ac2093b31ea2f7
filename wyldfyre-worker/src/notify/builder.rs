//! Push payload to notification options.
//!
//! The platform is an explicit parameter rather than ambient worker state,
//! so a push arriving before the client reports its platform still builds a
//! well-defined (lean) notification.

use chrono::Utc;
use tracing::debug;
use wyldfyre_core::{
    ClientPlatform, NotificationAction, NotificationData, NotificationOptions, PushKind,
    PushPayload, WorkerConfig,
};

const DEFAULT_TITLE: &str = "Wyld Fyre";

/// Build the title and display options for an inbound push message.
///
/// The payload is parsed as JSON; if that fails the raw bytes are treated
/// as the notification body text. Rich fields (vibrate, image, actions)
/// are only populated off iOS.
pub fn build_notification(
    payload: &[u8],
    platform: ClientPlatform,
    config: &WorkerConfig,
) -> (String, NotificationOptions) {
    let parsed = serde_json::from_slice::<PushPayload>(payload).unwrap_or_else(|e| {
        debug!(error = %e, "Push payload is not JSON, using raw text body");
        PushPayload {
            body: Some(String::from_utf8_lossy(payload).into_owned()),
            ..Default::default()
        }
    });
    build_from_payload(parsed, platform, config)
}

/// Build from an already-parsed payload.
pub fn build_from_payload(
    payload: PushPayload,
    platform: ClientPlatform,
    config: &WorkerConfig,
) -> (String, NotificationOptions) {
    let title = payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let kind = payload.kind.unwrap_or_default();

    let data = NotificationData {
        url: payload.url.unwrap_or_else(|| "/".to_string()),
        timestamp: Utc::now().timestamp_millis(),
        kind,
        conversation_id: payload.conversation_id,
        agent_name: payload.agent_name,
    };

    let mut options = NotificationOptions {
        body: payload.body.unwrap_or_default(),
        icon: config.notification_icon.clone(),
        badge: config.notification_badge.clone(),
        tag: payload
            .tag
            .unwrap_or_else(|| config.notification_tag.clone()),
        // Renotify unless the server explicitly opted out.
        renotify: payload.renotify.unwrap_or(true),
        require_interaction: payload.require_interaction.unwrap_or(false),
        silent: payload.silent.unwrap_or(false),
        data,
        vibrate: None,
        image: None,
        actions: None,
    };

    if !platform.is_ios() {
        options.vibrate = Some(
            payload
                .vibrate
                .unwrap_or_else(|| config.default_vibrate.clone()),
        );
        options.image = payload.image;
        options.actions = Some(payload.actions.unwrap_or_else(|| default_actions(kind)));
    }

    (title, options)
}

/// Action buttons per push category.
fn default_actions(kind: PushKind) -> Vec<NotificationAction> {
    match kind {
        PushKind::Message => vec![
            NotificationAction::new("reply", "Reply"),
            NotificationAction::new("dismiss", "Dismiss"),
        ],
        PushKind::AgentStatus | PushKind::Task => {
            vec![NotificationAction::new("view", "View")]
        }
        PushKind::Generic => Vec::new(),
    }
}
