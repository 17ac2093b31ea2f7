//! Notification click resolution and client dispatch.
//!
//! The host closes the clicked notification before handing the event to
//! the worker, so a `dismiss` resolves to doing nothing further.

use async_trait::async_trait;
use tracing::debug;
use wyldfyre_core::{NotificationData, NotifyError};

use crate::messages::ClientMessage;
use crate::router::url_path;

/// What a notification click should do after the notification closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Nothing further; the notification was dismissed.
    None,
    /// Route the user to this URL.
    Navigate(String),
}

/// An open window client under (or eligible for) this worker's control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHandle {
    pub id: String,
    /// The client's current full URL.
    pub url: String,
}

/// Host seam over the worker's client surface: open windows, message
/// posting, focus, window opening, notification display, and the app badge.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// All open window clients, including ones not yet controlled.
    async fn clients(&self) -> Vec<ClientHandle>;

    async fn post_message(
        &self,
        client_id: &str,
        message: &ClientMessage,
    ) -> Result<(), NotifyError>;

    async fn focus(&self, client_id: &str) -> Result<(), NotifyError>;

    async fn open_window(&self, url: &str) -> Result<(), NotifyError>;

    /// Take control of all open clients without waiting for reloads.
    async fn claim(&self) -> Result<(), NotifyError>;

    async fn show_notification(
        &self,
        title: &str,
        options: &wyldfyre_core::NotificationOptions,
    ) -> Result<(), NotifyError>;

    /// Set the OS app-icon badge; `None` clears it.
    async fn set_badge(&self, count: Option<u32>) -> Result<(), NotifyError>;
}

/// Resolve the pressed action against the notification's data bag.
///
/// - `dismiss` does nothing further
/// - `reply` targets the conversation with the reply box focused, when a
///   conversation id is present
/// - `view`, any unknown action, and a body click all use the data URL
pub fn resolve_click(action: Option<&str>, data: &NotificationData) -> ClickDisposition {
    match action {
        Some("dismiss") => ClickDisposition::None,
        Some("reply") => {
            if let Some(conversation_id) = &data.conversation_id {
                ClickDisposition::Navigate(format!("/chat/{}?focus=reply", conversation_id))
            } else {
                ClickDisposition::Navigate(data.url.clone())
            }
        }
        _ => ClickDisposition::Navigate(data.url.clone()),
    }
}

/// Deliver a click to the best client.
///
/// Preference order: a client already on the target path (exact match or
/// path prefix) gets the message and focus; otherwise the first open
/// client gets the message with a `navigate` field and focus; otherwise a
/// new window opens at the target.
pub async fn dispatch_click<C: ClientRegistry>(
    registry: &C,
    target_url: &str,
    action: Option<&str>,
) -> Result<(), NotifyError> {
    let target_path = target_url.split('?').next().unwrap_or(target_url);
    let clients = registry.clients().await;

    if let Some(client) = clients.iter().find(|client| {
        let client_path = url_path(&client.url);
        client_path == target_path || target_path.starts_with(client_path.as_str())
    }) {
        debug!(client = %client.id, url = %target_url, "Focusing matching client");
        registry
            .post_message(
                &client.id,
                &ClientMessage::NotificationClick {
                    url: target_url.to_string(),
                    action: action.map(str::to_string),
                    navigate: None,
                },
            )
            .await?;
        return registry.focus(&client.id).await;
    }

    if let Some(client) = clients.first() {
        debug!(client = %client.id, url = %target_url, "Redirecting first open client");
        registry
            .post_message(
                &client.id,
                &ClientMessage::NotificationClick {
                    url: target_url.to_string(),
                    action: action.map(str::to_string),
                    navigate: Some(target_url.to_string()),
                },
            )
            .await?;
        return registry.focus(&client.id).await;
    }

    debug!(url = %target_url, "No open clients, opening window");
    registry.open_window(target_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wyldfyre_core::NotificationOptions;

    fn data(url: &str, conversation_id: Option<&str>) -> NotificationData {
        NotificationData {
            url: url.to_string(),
            conversation_id: conversation_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_dismiss_does_nothing() {
        let disposition = resolve_click(Some("dismiss"), &data("/chat/abc", Some("abc")));
        assert_eq!(disposition, ClickDisposition::None);
    }

    #[test]
    fn test_reply_targets_conversation() {
        let disposition = resolve_click(Some("reply"), &data("/", Some("abc")));
        assert_eq!(
            disposition,
            ClickDisposition::Navigate("/chat/abc?focus=reply".to_string())
        );
    }

    #[test]
    fn test_reply_without_conversation_keeps_data_url() {
        let disposition = resolve_click(Some("reply"), &data("/agents/planner", None));
        assert_eq!(
            disposition,
            ClickDisposition::Navigate("/agents/planner".to_string())
        );
    }

    #[test]
    fn test_view_unknown_and_body_clicks_use_data_url() {
        let d = data("/agents/planner", None);
        for action in [Some("view"), Some("archive"), None] {
            assert_eq!(
                resolve_click(action, &d),
                ClickDisposition::Navigate("/agents/planner".to_string())
            );
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Post(String, Option<String>),
        Focus(String),
        Open(String),
    }

    struct RecordingRegistry {
        open_clients: Vec<ClientHandle>,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingRegistry {
        fn new(open_clients: Vec<ClientHandle>) -> Self {
            Self {
                open_clients,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ClientRegistry for RecordingRegistry {
        async fn clients(&self) -> Vec<ClientHandle> {
            self.open_clients.clone()
        }

        async fn post_message(
            &self,
            client_id: &str,
            message: &ClientMessage,
        ) -> Result<(), NotifyError> {
            let ClientMessage::NotificationClick { navigate, .. } = message;
            self.calls
                .lock()
                .unwrap()
                .push(Call::Post(client_id.to_string(), navigate.clone()));
            Ok(())
        }

        async fn focus(&self, client_id: &str) -> Result<(), NotifyError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Focus(client_id.to_string()));
            Ok(())
        }

        async fn open_window(&self, url: &str) -> Result<(), NotifyError> {
            self.calls.lock().unwrap().push(Call::Open(url.to_string()));
            Ok(())
        }

        async fn claim(&self) -> Result<(), NotifyError> {
            Ok(())
        }

        async fn show_notification(
            &self,
            _title: &str,
            _options: &NotificationOptions,
        ) -> Result<(), NotifyError> {
            Ok(())
        }

        async fn set_badge(&self, _count: Option<u32>) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    fn handle(id: &str, url: &str) -> ClientHandle {
        ClientHandle {
            id: id.to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_matching_client_is_messaged_and_focused() {
        let registry = RecordingRegistry::new(vec![
            handle("a", "https://app.wyldfyre.dev/projects"),
            handle("b", "https://app.wyldfyre.dev/chat/abc"),
        ]);

        dispatch_click(&registry, "/chat/abc?focus=reply", Some("reply"))
            .await
            .unwrap();

        assert_eq!(
            registry.calls(),
            vec![
                Call::Post("b".to_string(), None),
                Call::Focus("b".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_prefix_match_counts() {
        let registry =
            RecordingRegistry::new(vec![handle("a", "https://app.wyldfyre.dev/chat")]);

        dispatch_click(&registry, "/chat/abc", None).await.unwrap();

        assert_eq!(
            registry.calls(),
            vec![
                Call::Post("a".to_string(), None),
                Call::Focus("a".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_first_client_navigates_when_no_match() {
        let registry = RecordingRegistry::new(vec![
            handle("a", "https://app.wyldfyre.dev/projects"),
            handle("b", "https://app.wyldfyre.dev/settings"),
        ]);

        dispatch_click(&registry, "/chat/abc", None).await.unwrap();

        assert_eq!(
            registry.calls(),
            vec![
                Call::Post("a".to_string(), Some("/chat/abc".to_string())),
                Call::Focus("a".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_no_clients_opens_window() {
        let registry = RecordingRegistry::new(vec![]);

        dispatch_click(&registry, "/chat/abc", None).await.unwrap();

        assert_eq!(registry.calls(), vec![Call::Open("/chat/abc".to_string())]);
    }
}
