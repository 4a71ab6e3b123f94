//! Pure reducer function for state transitions
//!
//! The reducer is a pure function: `(State, Action) -> State`. It never
//! talks to the store. When an action needs store work the reducer records
//! an [`Effect`] in `state.effect` and the event loop starts it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libpenfeed::service::composer::{Field, SubmitOutcome};

use super::actions::{Action, Effect};
use super::state::{AppState, StatusBarState};

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => match key_action(&state, key) {
            Some(action) => reduce(state, action),
            None => state,
        },
        Action::Tick => state,
        Action::Resize(_, _) => state,

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Feed ===
        Action::FeedReloadRequested if state.can_reload() => AppState {
            reload_in_flight: true,
            effect: Some(Effect::Reload),
            ..state
        },
        Action::FeedReloadRequested => state,

        Action::FeedReloaded(feed) => {
            let feed_scroll = state.feed_scroll.min(feed.len().saturating_sub(1));
            AppState {
                feed,
                feed_scroll,
                reload_in_flight: false,
                ..state
            }
        }

        Action::FeedReloadFailed => AppState {
            reload_in_flight: false,
            ..state
        },

        Action::FeedScrollUp => AppState {
            feed_scroll: state.feed_scroll.saturating_sub(1),
            ..state
        },

        Action::FeedScrollDown => {
            let last = state.feed.len().saturating_sub(1);
            AppState {
                feed_scroll: (state.feed_scroll + 1).min(last),
                ..state
            }
        }

        Action::LoadingChanged(loading) => AppState { loading, ..state },

        // === Composer ===
        Action::ComposerOpen => AppState {
            composer: state.composer.open(),
            ..state
        },

        Action::ComposerCancel => AppState {
            composer: state.composer.cancel(),
            focus: Field::Title,
            ..state
        },

        Action::ComposerFocusNext => AppState {
            focus: state.focus.next(),
            ..state
        },

        Action::ComposerFocusPrev => AppState {
            focus: state.focus.prev(),
            ..state
        },

        Action::ComposerFieldChanged { field, value } if state.composer_editable() => AppState {
            composer: state.composer.set_field(field, value),
            ..state
        },
        Action::ComposerFieldChanged { .. } => state,

        Action::ComposerSubmitRequested if state.can_submit() => {
            let composer = state.composer.begin_submit();
            let draft = composer.draft();
            AppState {
                composer,
                effect: Some(Effect::Submit(draft)),
                ..state
            }
        }
        Action::ComposerSubmitRequested => state,

        Action::ComposerSubmitFinished(outcome) => {
            // Cancelled while in flight; the panel may hold a newer draft
            let waiting = state.composer.is_submitting();
            let composer = state.composer.finish_submit(&outcome);
            match outcome {
                SubmitOutcome::Published { feed, .. } => {
                    let feed = feed.unwrap_or(state.feed);
                    let feed_scroll = state.feed_scroll.min(feed.len().saturating_sub(1));
                    if !waiting {
                        return AppState {
                            composer,
                            feed,
                            feed_scroll,
                            ..state
                        };
                    }
                    AppState {
                        composer,
                        feed,
                        feed_scroll,
                        focus: Field::Title,
                        status: StatusBarState {
                            message: Some("Post published".to_string()),
                        },
                        ..state
                    }
                }
                // Logged by the service; nothing is shown
                SubmitOutcome::Rejected(_) => AppState { composer, ..state },
            }
        }

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

/// Map a key press to an action
///
/// Returns `None` for keys with no binding. While the composer is editable
/// those keys belong to the focused field.
pub fn key_action(state: &AppState, key: KeyEvent) -> Option<Action> {
    // Global keybindings
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),
        (KeyCode::F(1), _) => {
            return Some(if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            });
        }
        (KeyCode::Esc, _) if state.help_visible => return Some(Action::HideHelp),
        _ => {}
    }

    if state.help_visible {
        return None;
    }

    if state.composer.is_visible() {
        composer_key(state, key)
    } else {
        feed_key(key)
    }
}

fn composer_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(Action::ComposerCancel),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(Action::ComposerSubmitRequested),
        (KeyCode::Tab, _) => Some(Action::ComposerFocusNext),
        (KeyCode::BackTab, _) => Some(Action::ComposerFocusPrev),
        // Single-line fields: Enter moves on
        (KeyCode::Enter, _) if state.focus != Field::Body => Some(Action::ComposerFocusNext),
        _ => None,
    }
}

fn feed_key(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(Action::Quit),
        (KeyCode::Char('n'), KeyModifiers::NONE) => Some(Action::ComposerOpen),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(Action::FeedReloadRequested),
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            Some(Action::FeedScrollDown)
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Some(Action::FeedScrollUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libpenfeed::error::{StoreError, StoreOp};
    use libpenfeed::service::composer::Panel;
    use libpenfeed::service::feed::{DateStyle, Feed};
    use libpenfeed::Post;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn feed_of(n: usize) -> Feed {
        let posts: Vec<Post> = (0..n)
            .map(|i| Post {
                title: format!("T{i}"),
                author: "A".to_string(),
                body: "<p>b</p>".to_string(),
                timestamp: 1_700_000_000_000_000_000,
            })
            .collect();
        Feed::render(&posts, &DateStyle::utc("%Y"))
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let state_clone = state.clone();

        let new_state = reduce(state_clone.clone(), Action::SetStatus("Test".to_string()));

        assert!(state_clone.status.message.is_none());
        assert_eq!(new_state.status.message, Some("Test".to_string()));
    }

    #[test]
    fn test_quit_action() {
        let state = reduce(AppState::new(), Action::Quit);
        assert!(state.should_quit);
    }

    #[test]
    fn test_reload_request_sets_effect() {
        let state = reduce(AppState::new(), Action::FeedReloadRequested);
        assert!(state.reload_in_flight);
        assert_eq!(state.effect, Some(Effect::Reload));
    }

    #[test]
    fn test_reload_refused_while_loading() {
        let state = reduce(AppState::new(), Action::LoadingChanged(true));
        let state = reduce(state, Action::FeedReloadRequested);
        assert!(!state.reload_in_flight);
        assert_eq!(state.effect, None);
    }

    #[test]
    fn test_failed_reload_keeps_feed() {
        let mut state = AppState::new();
        state.feed = feed_of(2);
        let state = reduce(state, Action::FeedReloadRequested);
        let state = reduce(state, Action::FeedReloadFailed);
        assert_eq!(state.feed.len(), 2);
        assert!(!state.reload_in_flight);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = AppState::new();
        state.feed = feed_of(2);
        let state = reduce(state, Action::FeedScrollUp);
        assert_eq!(state.feed_scroll, 0);
        let state = reduce(state, Action::FeedScrollDown);
        let state = reduce(state, Action::FeedScrollDown);
        assert_eq!(state.feed_scroll, 1);
    }

    #[test]
    fn test_submit_request_records_draft() {
        let state = reduce(AppState::new(), Action::ComposerOpen);
        let state = reduce(
            state,
            Action::ComposerFieldChanged {
                field: Field::Title,
                value: "Hello".to_string(),
            },
        );
        let state = reduce(state, Action::ComposerSubmitRequested);

        assert_eq!(state.composer.panel, Panel::Submitting);
        match state.effect {
            Some(Effect::Submit(draft)) => assert_eq!(draft.title, "Hello"),
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn test_submit_refused_when_closed() {
        let state = reduce(AppState::new(), Action::ComposerSubmitRequested);
        assert_eq!(state.effect, None);
        assert_eq!(state.composer.panel, Panel::Closed);
    }

    #[test]
    fn test_rejected_submit_reopens_panel() {
        let state = reduce(AppState::new(), Action::ComposerOpen);
        let state = reduce(state, Action::ComposerSubmitRequested);
        let outcome = SubmitOutcome::Rejected(StoreError::new(StoreOp::CreatePost, "down"));
        let state = reduce(state, Action::ComposerSubmitFinished(outcome));
        assert_eq!(state.composer.panel, Panel::Open);
        assert!(state.status.message.is_none());
    }

    #[test]
    fn test_late_success_keeps_newer_draft() {
        let mut state = reduce(AppState::new(), Action::ComposerOpen);
        state = reduce(
            state,
            Action::ComposerFieldChanged {
                field: Field::Title,
                value: "First".to_string(),
            },
        );
        state = reduce(state, Action::ComposerSubmitRequested);
        state = reduce(state, Action::ComposerCancel);
        state = reduce(state, Action::ComposerOpen);
        state = reduce(state, Action::ComposerFocusNext);
        state = reduce(
            state,
            Action::ComposerFieldChanged {
                field: Field::Title,
                value: "Second draft".to_string(),
            },
        );

        let outcome = SubmitOutcome::Published {
            created: None,
            feed: Some(feed_of(1)),
        };
        let state = reduce(state, Action::ComposerSubmitFinished(outcome));

        assert_eq!(state.composer.panel, Panel::Open);
        assert_eq!(state.composer.title, "Second draft");
        assert_eq!(state.focus, Field::Author);
        assert_eq!(state.feed.len(), 1);
        assert!(state.status.message.is_none());
    }

    #[test]
    fn test_q_types_into_open_composer() {
        let state = reduce(AppState::new(), Action::ComposerOpen);
        assert!(key_action(&state, key(KeyCode::Char('q'))).is_none());
    }

    #[test]
    fn test_key_reduces_through_keymap() {
        let state = reduce(AppState::new(), Action::Key(key(KeyCode::Char('n'))));
        assert!(state.composer.is_visible());
    }
}
