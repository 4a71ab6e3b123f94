//! Service layer adapter for the TUI
//!
//! Bridges the async [`BlogService`] and the synchronous event loop.
//!
//! - `ServiceHandle` owns the service and a tokio runtime
//! - Reload and submit are spawned on the runtime; their results come back
//!   as [`ServiceEvent`]s on a crossbeam channel
//! - Loading indicator changes are forwarded to the same channel
//!
//! # Example
//!
//! ```no_run
//! use pen_tui::services::{ServiceEvent, ServiceHandle};
//! use libpenfeed::Config;
//!
//! # fn example() -> pen_tui::error::Result<()> {
//! let services = ServiceHandle::new(&Config::default())?;
//! services.reload();
//!
//! // In the event loop, drain finished work
//! for event in services.try_events() {
//!     if let ServiceEvent::FeedLoaded(feed) = event {
//!         println!("{} posts", feed.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use libpenfeed::config::DisplayConfig;
use libpenfeed::service::composer::SubmitOutcome;
use libpenfeed::service::feed::Feed;
use libpenfeed::service::loading::{Loading, LoadingIndicator};
use libpenfeed::{BlogService, Config, NewPost, PostStore};
use tracing::debug;

use crate::app::{Action, Effect};
use crate::error::Result;

/// Results of work spawned on the runtime
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    /// Reload succeeded
    FeedLoaded(Feed),
    /// Reload failed; the previous feed stands
    FeedUnchanged,
    /// Submit finished, successfully or not
    Submitted(SubmitOutcome),
    /// Loading indicator shown or hidden
    LoadingChanged(bool),
}

impl From<ServiceEvent> for Action {
    fn from(event: ServiceEvent) -> Self {
        match event {
            ServiceEvent::FeedLoaded(feed) => Action::FeedReloaded(feed),
            ServiceEvent::FeedUnchanged => Action::FeedReloadFailed,
            ServiceEvent::Submitted(outcome) => Action::ComposerSubmitFinished(outcome),
            ServiceEvent::LoadingChanged(visible) => Action::LoadingChanged(visible),
        }
    }
}

/// Service handle for TUI operations
pub struct ServiceHandle {
    service: Arc<BlogService>,
    runtime: tokio::runtime::Runtime,
    tx: Sender<ServiceEvent>,
    rx: Receiver<ServiceEvent>,
}

impl ServiceHandle {
    /// Create a handle talking to the HTTP store named in `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        Self::from_service(BlogService::new(config))
    }

    /// Create a handle over any store, useful for testing
    pub fn with_store(store: Arc<dyn PostStore>, display: &DisplayConfig) -> Result<Self> {
        Self::from_service(BlogService::from_store(store, display))
    }

    fn from_service(service: BlogService) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (tx, rx) = unbounded();

        let handle = Self {
            service: Arc::new(service),
            runtime,
            tx,
            rx,
        };
        handle.forward_loading();
        Ok(handle)
    }

    /// Bridge the indicator's watch channel to the crossbeam channel
    fn forward_loading(&self) {
        let mut loading_rx = self.service.loading().subscribe();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            while loading_rx.changed().await.is_ok() {
                let visible = *loading_rx.borrow_and_update() == Loading::Visible;
                if tx.send(ServiceEvent::LoadingChanged(visible)).is_err() {
                    // Receiver dropped, stop forwarding
                    break;
                }
            }
        });
    }

    /// Fetch the feed in the background
    pub fn reload(&self) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let event = match service.feed().fetch().await {
                Some(feed) => ServiceEvent::FeedLoaded(feed),
                None => ServiceEvent::FeedUnchanged,
            };
            let _ = tx.send(event);
        });
    }

    /// Create a post, then reload, in the background
    pub fn submit(&self, draft: NewPost) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = service.composer().publish(&draft).await;
            let _ = tx.send(ServiceEvent::Submitted(outcome));
        });
    }

    /// Start the store work a reducer asked for
    pub fn run(&self, effect: Effect) {
        debug!(?effect, "Starting store work");
        match effect {
            Effect::Reload => self.reload(),
            Effect::Submit(draft) => self.submit(draft),
        }
    }

    /// Drain events without blocking
    pub fn try_events(&self) -> Vec<ServiceEvent> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next event
    pub fn next_event(&self, timeout: Duration) -> Option<ServiceEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// The indicator bracketing every store call
    pub fn loading(&self) -> &LoadingIndicator {
        self.service.loading()
    }

    pub fn is_loading(&self) -> bool {
        self.service.loading().is_visible()
    }

    /// Adapter name, for logs
    pub fn store_name(&self) -> &str {
        self.service.store_name()
    }
}
