//! Post composer
//!
//! The authoring panel is modelled as a plain value, [`ComposerState`], moved
//! through pure transitions:
//!
//! ```text
//! Closed --open--> Open --submit--> Submitting --ok--> Closed (fields reset)
//!                   ^                    |
//!                   +-------failed-------+   (fields kept for retry)
//! cancel: any state --> Closed (fields reset)
//! ```
//!
//! [`PostComposer`] runs the store side of a submit: create the post, then
//! reload the feed. Front ends that run the store call elsewhere (the TUI
//! spawns it on a runtime) use [`PostComposer::publish`] and apply the
//! outcome with [`ComposerState::finish_submit`]; everyone else can call
//! [`PostComposer::submit`], which does the whole round trip.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::StoreError;
use crate::store::PostStore;
use crate::types::{NewPost, Post};

use super::editor::RichTextEditor;
use super::feed::{Feed, PostListView};
use super::loading::LoadingIndicator;

/// Visibility and activity of the authoring panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Closed,
    Open,
    /// A create call is in flight
    Submitting,
}

/// Composer input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Body,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Title => Field::Author,
            Field::Author => Field::Body,
            Field::Body => Field::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Title => Field::Body,
            Field::Author => Field::Title,
            Field::Body => Field::Author,
        }
    }
}

/// Authoring panel state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub panel: Panel,
    pub title: String,
    pub author: String,
    /// Mirror of the editor's HTML; empty means the editor must be cleared
    pub body: String,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal the panel, keeping whatever was typed before
    pub fn open(self) -> Self {
        match self.panel {
            Panel::Submitting => self,
            Panel::Closed | Panel::Open => Self {
                panel: Panel::Open,
                ..self
            },
        }
    }

    /// Hide the panel and discard all input
    pub fn cancel(self) -> Self {
        Self::default()
    }

    pub fn set_field(self, field: Field, value: String) -> Self {
        match field {
            Field::Title => Self {
                title: value,
                ..self
            },
            Field::Author => Self {
                author: value,
                ..self
            },
            Field::Body => Self {
                body: value,
                ..self
            },
        }
    }

    /// Copy the editor's current HTML into the state
    pub fn capture_body<E: RichTextEditor + ?Sized>(self, editor: &E) -> Self {
        Self {
            body: editor.html(),
            ..self
        }
    }

    /// The request a submit would send
    pub fn draft(&self) -> NewPost {
        NewPost {
            title: self.title.clone(),
            author: self.author.clone(),
            body: self.body.clone(),
        }
    }

    pub fn begin_submit(self) -> Self {
        Self {
            panel: Panel::Submitting,
            ..self
        }
    }

    /// Apply the result of a submit
    ///
    /// Success closes the panel and resets every field. Failure reopens the
    /// panel with the fields untouched. Either way the state is only touched
    /// while it is still `Submitting`: after a cancel the panel may hold a
    /// new draft that the old call knows nothing about.
    pub fn finish_submit(self, outcome: &SubmitOutcome) -> Self {
        if self.panel != Panel::Submitting {
            return self;
        }
        match outcome {
            SubmitOutcome::Published { .. } => Self::default(),
            SubmitOutcome::Rejected(_) => Self {
                panel: Panel::Open,
                ..self
            },
        }
    }

    /// Panel shown on screen (open or submitting)
    pub fn is_visible(&self) -> bool {
        self.panel != Panel::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.panel == Panel::Submitting
    }
}

/// Clear the editor if the state says the body is empty
///
/// Returns whether the editor was reset.
pub fn sync_editor<E: RichTextEditor + ?Sized>(state: &ComposerState, editor: &mut E) -> bool {
    if state.body.is_empty() && !editor.is_empty() {
        editor.reset();
        true
    } else {
        false
    }
}

/// Result of a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Published {
        /// The post as echoed by the store, if it echoes
        created: Option<Post>,
        /// The reloaded feed, or `None` if the reload failed
        feed: Option<Feed>,
    },
    Rejected(StoreError),
}

impl SubmitOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, SubmitOutcome::Published { .. })
    }
}

/// Runs submits against the store
#[derive(Clone)]
pub struct PostComposer {
    store: Arc<dyn PostStore>,
    loading: LoadingIndicator,
    list: PostListView,
}

impl PostComposer {
    pub fn new(store: Arc<dyn PostStore>, loading: LoadingIndicator, list: PostListView) -> Self {
        Self {
            store,
            loading,
            list,
        }
    }

    /// Create the post, then reload the feed
    ///
    /// The loading indicator is shown for the create call and again, by the
    /// list view, for the reload. The reload only starts once the create has
    /// completed. A failed reload does not turn a successful create into a
    /// failure.
    pub async fn publish(&self, draft: &NewPost) -> SubmitOutcome {
        let created = {
            let _busy = self.loading.show();
            self.store
                .create_post(&draft.title, &draft.body, &draft.author)
                .await
        };

        match created {
            Ok(created) => {
                info!(store = self.store.name(), title = %draft.title, "Post created");
                let feed = self.list.fetch().await;
                SubmitOutcome::Published { created, feed }
            }
            Err(e) => {
                error!(store = self.store.name(), error = %e, "Error creating post");
                SubmitOutcome::Rejected(e)
            }
        }
    }

    /// Submit the composer's fields and apply the outcome
    ///
    /// Reads the body from `editor`, publishes, replaces `feed` when the
    /// reload succeeded, and clears `editor` when the post was created.
    pub async fn submit<E: RichTextEditor + ?Sized>(
        &self,
        state: ComposerState,
        editor: &mut E,
        feed: &mut Feed,
    ) -> ComposerState {
        let state = state.capture_body(&*editor).begin_submit();
        let outcome = self.publish(&state.draft()).await;

        if let SubmitOutcome::Published {
            feed: Some(fresh), ..
        } = &outcome
        {
            *feed = fresh.clone();
        }

        let state = state.finish_submit(&outcome);
        sync_editor(&state, editor);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreOp;

    fn filled() -> ComposerState {
        ComposerState::new()
            .open()
            .set_field(Field::Title, "Hello".to_string())
            .set_field(Field::Author, "Alice".to_string())
            .set_field(Field::Body, "<p>World</p>".to_string())
    }

    #[test]
    fn test_starts_closed_and_empty() {
        let state = ComposerState::new();
        assert_eq!(state.panel, Panel::Closed);
        assert!(state.title.is_empty());
        assert!(state.author.is_empty());
        assert!(state.body.is_empty());
    }

    #[test]
    fn test_open_keeps_fields() {
        let state = filled();
        let state = ComposerState {
            panel: Panel::Closed,
            ..state
        };
        let state = state.open();
        assert_eq!(state.panel, Panel::Open);
        assert_eq!(state.title, "Hello");
    }

    #[test]
    fn test_open_is_idempotent() {
        let state = filled().open().open();
        assert_eq!(state.panel, Panel::Open);
    }

    #[test]
    fn test_cancel_from_every_state() {
        for panel in [Panel::Closed, Panel::Open, Panel::Submitting] {
            let state = ComposerState { panel, ..filled() }.cancel();
            assert_eq!(state, ComposerState::default());
        }
    }

    #[test]
    fn test_draft_fields() {
        let draft = filled().draft();
        assert_eq!(draft, NewPost::new("Hello", "Alice", "<p>World</p>"));
    }

    #[test]
    fn test_finish_submit_success_resets() {
        let state = filled().begin_submit();
        let state = state.finish_submit(&SubmitOutcome::Published {
            created: None,
            feed: None,
        });
        assert_eq!(state, ComposerState::default());
    }

    #[test]
    fn test_finish_submit_failure_keeps_fields() {
        let state = filled().begin_submit();
        let state = state.finish_submit(&SubmitOutcome::Rejected(StoreError::new(
            StoreOp::CreatePost,
            "nope",
        )));
        assert_eq!(state.panel, Panel::Open);
        assert_eq!(state.title, "Hello");
        assert_eq!(state.author, "Alice");
        assert_eq!(state.body, "<p>World</p>");
    }

    #[test]
    fn test_failure_after_cancel_stays_closed() {
        let state = filled().begin_submit().cancel();
        let state = state.finish_submit(&SubmitOutcome::Rejected(StoreError::new(
            StoreOp::CreatePost,
            "nope",
        )));
        assert_eq!(state.panel, Panel::Closed);
    }

    #[test]
    fn test_success_after_cancel_keeps_new_draft() {
        let state = filled()
            .begin_submit()
            .cancel()
            .open()
            .set_field(Field::Title, "Second draft".to_string());
        let state = state.finish_submit(&SubmitOutcome::Published {
            created: None,
            feed: None,
        });
        assert_eq!(state.panel, Panel::Open);
        assert_eq!(state.title, "Second draft");
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(Field::Title.next(), Field::Author);
        assert_eq!(Field::Body.next(), Field::Title);
        assert_eq!(Field::Title.prev(), Field::Body);
    }
}
