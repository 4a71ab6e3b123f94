//! Composer panel widgets
//!
//! Holds the three editors of the authoring panel. The editors own the text
//! being typed; [`ComposerState`] in the app state mirrors it and decides
//! when the editors must be emptied.

use crossterm::event::KeyEvent;
use libpenfeed::service::composer::{ComposerState, Field};
use libpenfeed::service::editor::RichTextEditor;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::AppState;
use crate::editor::BodyEditor;

/// Stateful editors for the composer panel
pub struct ComposerWidgets<'a> {
    title: TextArea<'a>,
    author: TextArea<'a>,
    body: BodyEditor<'a>,
}

impl Default for ComposerWidgets<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ComposerWidgets<'a> {
    pub fn new() -> Self {
        Self {
            title: single_line("Title"),
            author: single_line("Your name"),
            body: BodyEditor::new(),
        }
    }

    /// Feed a key to one editor, returning that field's new value
    pub fn input(&mut self, field: Field, key: KeyEvent) -> String {
        match field {
            Field::Title => {
                self.title.input(key);
            }
            Field::Author => {
                self.author.input(key);
            }
            Field::Body => self.body.input(key),
        }
        self.value(field)
    }

    /// Current value of a field; the body as HTML
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Title => self.title.lines().join(""),
            Field::Author => self.author.lines().join(""),
            Field::Body => self.body.html(),
        }
    }

    /// Empty every editor
    pub fn clear(&mut self) {
        self.title = single_line("Title");
        self.author = single_line("Your name");
        self.body.reset();
    }

    /// Bring the editors in line with the state
    ///
    /// A closed panel means nothing typed survives. While the panel is open
    /// the editors are the source of truth and are left alone.
    pub fn sync(&mut self, state: &ComposerState) {
        if !state.is_visible() && !self.is_blank() {
            self.clear();
        }
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.body.is_empty()
    }

    /// Render the panel into `area`
    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Author
                Constraint::Min(3),    // Body
            ])
            .split(area);

        let submitting = state.composer.is_submitting();
        let colors = state.config.colors_enabled;

        self.title
            .set_block(field_block(" Title ", state.focus == Field::Title, submitting, colors));
        self.author
            .set_block(field_block(" Author ", state.focus == Field::Author, submitting, colors));
        self.body.textarea_mut().set_block(field_block(
            " Body ",
            state.focus == Field::Body,
            submitting,
            colors,
        ));

        for (field, textarea) in [
            (Field::Title, &mut self.title),
            (Field::Author, &mut self.author),
            (Field::Body, self.body.textarea_mut()),
        ] {
            let cursor = if state.focus == field && !submitting {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            textarea.set_cursor_style(cursor);
        }

        frame.render_widget(&self.title, chunks[0]);
        frame.render_widget(&self.author, chunks[1]);
        frame.render_widget(self.body.textarea(), chunks[2]);
    }
}

fn single_line<'a>(placeholder: &str) -> TextArea<'a> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea
}

fn field_block<'a>(title: &'a str, focused: bool, submitting: bool, colors: bool) -> Block<'a> {
    let border = match (colors, submitting, focused) {
        (false, _, true) => Style::default().add_modifier(Modifier::BOLD),
        (false, _, false) => Style::default(),
        (true, true, _) => Style::default().fg(Color::Yellow),
        (true, false, true) => Style::default().fg(Color::Cyan),
        (true, false, false) => Style::default().fg(Color::DarkGray),
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}
