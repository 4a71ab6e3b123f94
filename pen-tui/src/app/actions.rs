//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! all possible actions that can modify application state.

use crossterm::event::KeyEvent;
use libpenfeed::service::composer::{Field, SubmitOutcome};
use libpenfeed::service::feed::Feed;
use libpenfeed::NewPost;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    // === Feed ===
    /// User asked for a fresh feed
    FeedReloadRequested,

    /// Fetch succeeded; replace the feed
    FeedReloaded(Feed),

    /// Fetch failed; the feed stays as it was
    FeedReloadFailed,

    FeedScrollUp,

    FeedScrollDown,

    /// Loading indicator switched on or off
    LoadingChanged(bool),

    // === Composer ===
    /// Reveal the authoring panel
    ComposerOpen,

    /// Hide the panel and discard input
    ComposerCancel,

    ComposerFocusNext,

    ComposerFocusPrev,

    /// A field's content changed
    ComposerFieldChanged { field: Field, value: String },

    /// User asked to publish the post
    ComposerSubmitRequested,

    /// Create call (and the reload after it) finished
    ComposerSubmitFinished(SubmitOutcome),

    // === Status Bar ===
    /// Update status message
    SetStatus(String),

    /// Clear status message
    ClearStatus,
}

/// Store work the reducer asks the event loop to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reload,
    Submit(NewPost),
}
