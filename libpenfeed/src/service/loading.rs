//! Global loading indicator
//!
//! A single shared on/off flag shown while a store call is in flight. The
//! indicator is switched on by [`LoadingIndicator::show`], which hands back a
//! guard; dropping the guard hides the indicator again, so every exit path
//! (success, error, early return) releases it.
//!
//! There is no reference counting: if two guards overlap, the first one
//! dropped hides the indicator while the second call is still running.
//! Front ends avoid this by never starting a store call while the indicator
//! is visible.

use std::sync::Arc;
use tokio::sync::watch;

/// Indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    Hidden,
    Visible,
}

/// Shared loading indicator
///
/// Clones refer to the same indicator.
#[derive(Clone)]
pub struct LoadingIndicator {
    state: Arc<watch::Sender<Loading>>,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    /// Create a hidden indicator
    pub fn new() -> Self {
        let (state, _) = watch::channel(Loading::Hidden);
        Self {
            state: Arc::new(state),
        }
    }

    /// Show the indicator until the returned guard is dropped
    #[must_use = "the indicator is hidden again as soon as the guard is dropped"]
    pub fn show(&self) -> LoadingGuard {
        self.state.send_replace(Loading::Visible);
        LoadingGuard {
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> Loading {
        *self.state.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.state() == Loading::Visible
    }

    /// Watch indicator changes
    pub fn subscribe(&self) -> watch::Receiver<Loading> {
        self.state.subscribe()
    }
}

/// Keeps the indicator visible while alive
pub struct LoadingGuard {
    state: Arc<watch::Sender<Loading>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.send_replace(Loading::Hidden);
    }
}
