//! Worker event dispatch.
//!
//! One `ServiceWorker` instance handles the full event surface: lifecycle
//! (`install`/`activate`), fetch interception, the client message protocol,
//! push receipt, and notification clicks. Events for different kinds may be
//! dispatched concurrently by the host; everything here is `&self` and all
//! shared state sits behind its own lock. Handlers are awaited to
//! completion by the host (the "extend until complete" contract) except the
//! router's write-through cache puts, which are deliberately fire-and-forget.

use std::sync::Arc;
use std::sync::RwLock;

use tokio::sync::oneshot;
use tracing::{info, warn};
use wyldfyre_core::{
    ClientPlatform, NotificationData, RequestSnapshot, ResponseSnapshot, WorkerConfig, WyldResult,
};

use crate::cache::{CacheBackend, CacheStore};
use crate::fetcher::NetworkFetcher;
use crate::messages::{MessageReply, WorkerMessage};
use crate::notify::{build_notification, dispatch_click, resolve_click, ClickDisposition};
use crate::notify::ClientRegistry;
use crate::router::{RouteOutcome, Router};
use crate::shared::SharedContentStore;

/// Worker lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerLifecycle {
    /// Created but not yet successfully installed.
    Installing,
    /// Installed, waiting for the previous worker to release its clients.
    Waiting,
    /// Activated and controlling clients.
    Active,
}

/// The Wyld Fyre service worker runtime.
pub struct ServiceWorker<B, F, C>
where
    B: CacheBackend + 'static,
    F: NetworkFetcher,
    C: ClientRegistry,
{
    config: WorkerConfig,
    store: CacheStore<B>,
    router: Router<B, F>,
    fetcher: Arc<F>,
    clients: Arc<C>,
    shared: Arc<SharedContentStore>,
    platform: RwLock<ClientPlatform>,
    lifecycle: RwLock<WorkerLifecycle>,
}

impl<B, F, C> ServiceWorker<B, F, C>
where
    B: CacheBackend + 'static,
    F: NetworkFetcher,
    C: ClientRegistry,
{
    /// Wire up a worker. Fails fast on invalid configuration.
    pub fn new(
        config: WorkerConfig,
        backend: Arc<B>,
        fetcher: Arc<F>,
        clients: Arc<C>,
    ) -> WyldResult<Self> {
        config.validate()?;
        let store = CacheStore::new(backend, config.clone());
        let shared = Arc::new(SharedContentStore::new(config.shared_content_ttl));
        let router = Router::new(
            config.clone(),
            store.clone(),
            Arc::clone(&fetcher),
            Arc::clone(&shared),
        );
        Ok(Self {
            config,
            store,
            router,
            fetcher,
            clients,
            shared,
            platform: RwLock::new(ClientPlatform::default()),
            lifecycle: RwLock::new(WorkerLifecycle::Installing),
        })
    }

    pub fn lifecycle(&self) -> WorkerLifecycle {
        *self.lifecycle.read().expect("lifecycle lock poisoned")
    }

    pub fn platform(&self) -> ClientPlatform {
        *self.platform.read().expect("platform lock poisoned")
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    fn set_lifecycle(&self, phase: WorkerLifecycle) {
        *self.lifecycle.write().expect("lifecycle lock poisoned") = phase;
    }

    /// `install` event: precache. An essential-asset failure propagates and
    /// leaves the worker in `Installing`; the browser retries later.
    pub async fn install(&self) -> WyldResult<()> {
        self.store.install(self.fetcher.as_ref()).await?;
        self.set_lifecycle(WorkerLifecycle::Waiting);
        info!(cache = %self.config.cache_name(), "Worker installed");
        Ok(())
    }

    /// `activate` event: purge stale generations, then claim every open
    /// client immediately.
    pub async fn activate(&self) -> WyldResult<()> {
        let purged = self.store.activate().await?;
        if let Err(e) = self.clients.claim().await {
            warn!(error = %e, "Client claim failed");
        }
        self.set_lifecycle(WorkerLifecycle::Active);
        info!(purged, "Worker activated");
        Ok(())
    }

    /// `fetch` event: route the request. `Ok(None)` means the worker
    /// declines and the browser networks the request normally.
    pub async fn handle_fetch(
        &self,
        request: &RequestSnapshot,
    ) -> WyldResult<Option<ResponseSnapshot>> {
        Ok(match self.router.handle(request).await? {
            RouteOutcome::Response(response) => Some(response),
            RouteOutcome::Unhandled => None,
        })
    }

    /// `message` event. Reply-port messages (`GET_VERSION`,
    /// `GET_SHARED_CONTENT`) answer over `reply`; for the rest the sender
    /// may pass `None`.
    pub async fn handle_message(
        &self,
        message: WorkerMessage,
        reply: Option<oneshot::Sender<MessageReply>>,
    ) -> WyldResult<()> {
        match message {
            WorkerMessage::SkipWaiting => {
                if self.lifecycle() == WorkerLifecycle::Waiting {
                    self.set_lifecycle(WorkerLifecycle::Active);
                    info!("Skip-waiting: worker promoted to active");
                }
            }
            WorkerMessage::SetPlatform { is_ios, is_android } => {
                let platform = if is_ios {
                    ClientPlatform::Ios
                } else if is_android {
                    ClientPlatform::Android
                } else {
                    ClientPlatform::Web
                };
                *self.platform.write().expect("platform lock poisoned") = platform;
            }
            WorkerMessage::CacheUrls { urls } => {
                self.store.cache_urls(self.fetcher.as_ref(), &urls).await;
            }
            WorkerMessage::ClearCache => {
                self.store.clear().await?;
            }
            WorkerMessage::GetVersion => {
                send_reply(
                    reply,
                    MessageReply::Version {
                        version: self.config.cache_name(),
                    },
                );
            }
            WorkerMessage::ShowNotification { notification } => {
                self.clients
                    .show_notification(&notification.title, &notification.options)
                    .await?;
            }
            WorkerMessage::GetSharedContent => {
                send_reply(
                    reply,
                    MessageReply::SharedContent {
                        content: self.shared.take().await,
                    },
                );
            }
            WorkerMessage::UpdateBadge { count } => {
                let badge = if count == 0 { None } else { Some(count) };
                self.clients.set_badge(badge).await?;
            }
        }
        Ok(())
    }

    /// `push` event: build platform-appropriate options and display them.
    pub async fn handle_push(&self, payload: &[u8]) -> WyldResult<()> {
        let (title, options) = build_notification(payload, self.platform(), &self.config);
        self.clients.show_notification(&title, &options).await?;
        Ok(())
    }

    /// `notificationclick` event. The host has already closed the
    /// notification; this resolves the target and routes the user there.
    pub async fn handle_notification_click(
        &self,
        action: Option<&str>,
        data: &NotificationData,
    ) -> WyldResult<()> {
        match resolve_click(action, data) {
            ClickDisposition::None => Ok(()),
            ClickDisposition::Navigate(target) => {
                dispatch_click(self.clients.as_ref(), &target, action).await?;
                Ok(())
            }
        }
    }
}

fn send_reply(reply: Option<oneshot::Sender<MessageReply>>, message: MessageReply) {
    if let Some(port) = reply {
        // A dropped reply port means the client navigated away; fine.
        let _ = port.send(message);
    }
}
