//! Application state
//!
//! Immutable state structure following functional programming principles.
//! All state transitions happen through the reducer (see `reducer.rs`).

use libpenfeed::config::UiSettings;
use libpenfeed::service::composer::{ComposerState, Field, Panel};
use libpenfeed::service::feed::Feed;

use super::actions::Effect;

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Loading indicator, mirrored from the service layer
    pub loading: bool,

    /// A reload has been requested and not yet answered
    pub reload_in_flight: bool,

    /// Most recently fetched feed
    pub feed: Feed,

    /// Index of the first post shown
    pub feed_scroll: usize,

    /// Authoring panel
    pub composer: ComposerState,

    /// Field receiving keystrokes while the panel is open
    pub focus: Field,

    /// Store work waiting to be started by the event loop
    pub effect: Option<Effect>,

    /// Status bar state
    pub status: StatusBarState,

    /// UI configuration
    pub config: UiConfig,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    /// Current status message
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Use unicode symbols (false = ASCII fallback, set by PEN_TUI_ASCII)
    pub unicode_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(UiConfig::default())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_settings(&UiSettings::default())
    }
}

impl UiConfig {
    /// Settings from the config file, overridden by the environment
    pub fn from_settings(settings: &UiSettings) -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("PEN_TUI_NO_COLOR").is_err();

        let unicode_enabled = std::env::var("PEN_TUI_ASCII").is_err();

        let tick_rate_ms = std::env::var("PEN_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(settings.tick_rate_ms);

        Self {
            colors_enabled,
            unicode_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            should_quit: false,
            help_visible: false,
            loading: false,
            reload_in_flight: false,
            feed: Feed::default(),
            feed_scroll: 0,
            composer: ComposerState::default(),
            focus: Field::Title,
            effect: None,
            status: StatusBarState::default(),
            config,
        }
    }

    /// True while any store call is pending or running
    pub fn is_busy(&self) -> bool {
        self.loading || self.reload_in_flight || self.composer.is_submitting()
    }

    /// A reload may start only when nothing else talks to the store
    pub fn can_reload(&self) -> bool {
        !self.is_busy()
    }

    /// Submitting needs an open panel and an idle store
    pub fn can_submit(&self) -> bool {
        self.composer.panel == Panel::Open && !self.is_busy()
    }

    /// Keystrokes go to the composer fields
    pub fn composer_editable(&self) -> bool {
        self.composer.panel == Panel::Open && !self.help_visible
    }
}
