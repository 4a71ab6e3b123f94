//! Body editor backed by tui-textarea
//!
//! The terminal stand-in for a rich-text widget: each line typed becomes a
//! paragraph of HTML with its text escaped.

use crossterm::event::KeyEvent;
use libpenfeed::service::editor::{paragraphs, RichTextEditor};
use tui_textarea::TextArea;

pub const BODY_PLACEHOLDER: &str = "Write your post content...";

/// Multi-line body editor
pub struct BodyEditor<'a> {
    textarea: TextArea<'a>,
}

impl Default for BodyEditor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BodyEditor<'a> {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(BODY_PLACEHOLDER);
        Self { textarea }
    }

    /// Editor pre-filled with plain text lines
    pub fn with_lines(lines: Vec<String>) -> Self {
        let mut textarea = TextArea::new(lines);
        textarea.set_placeholder_text(BODY_PLACEHOLDER);
        Self { textarea }
    }

    pub fn input(&mut self, key: KeyEvent) {
        self.textarea.input(key);
    }

    pub fn textarea(&self) -> &TextArea<'a> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'a> {
        &mut self.textarea
    }
}

impl RichTextEditor for BodyEditor<'_> {
    fn html(&self) -> String {
        paragraphs(self.textarea.lines())
    }

    fn reset(&mut self) {
        // Keep block and styles, drop the text
        let block = self.textarea.block().cloned();
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(BODY_PLACEHOLDER);
        if let Some(block) = block {
            textarea.set_block(block);
        }
        self.textarea = textarea;
    }

    fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }
}
