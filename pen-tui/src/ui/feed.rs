//! Feed rendering
//!
//! Each post block becomes a few terminal lines: title, byline and date,
//! then the body. Bodies are raw HTML; only their text is shown.

use libpenfeed::service::feed::{Feed, PostBlock};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use scraper::{Html, Selector};

use crate::app::AppState;

const BLOCK_SELECTOR: &str = "p, li, h1, h2, h3, h4, h5, h6, pre, blockquote";

/// Text of a body fragment, one entry per block element
///
/// Falls back to the fragment's whole text when it has no block elements.
pub fn body_text(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);

    let mut lines = Vec::new();
    if let Ok(selector) = Selector::parse(BLOCK_SELECTOR) {
        for element in fragment.select(&selector) {
            // Nested blocks are visited on their own
            if element
                .ancestors()
                .filter_map(scraper::ElementRef::wrap)
                .any(|a| selector.matches(&a))
            {
                continue;
            }
            lines.push(collapse(element.text()));
        }
    }

    if lines.is_empty() {
        let text = collapse(fragment.root_element().text());
        if !text.is_empty() {
            lines.push(text);
        }
    }
    lines
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn block_lines<'a>(block: &'a PostBlock, state: &AppState) -> Vec<Line<'a>> {
    let (title_style, meta_style) = if state.config.colors_enabled {
        (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Gray),
        )
    } else {
        (
            Style::default().add_modifier(Modifier::BOLD),
            Style::default(),
        )
    };

    let separator = if state.config.unicode_enabled { " · " } else { " - " };

    let mut lines = vec![
        Line::from(Span::styled(block.title.as_str(), title_style)),
        Line::from(vec![
            Span::styled(block.byline.as_str(), meta_style),
            Span::styled(separator, meta_style),
            Span::styled(block.date.as_str(), meta_style),
        ]),
    ];
    lines.extend(body_text(&block.body_html).into_iter().map(Line::from));
    lines.push(Line::from(""));
    lines
}

/// All lines for the feed, starting at the scrolled-to post
pub fn feed_lines<'a>(feed: &'a Feed, state: &AppState) -> Vec<Line<'a>> {
    if feed.is_empty() {
        return vec![Line::from(Span::styled(
            "No posts yet. Press n to write one.",
            Style::default().add_modifier(Modifier::ITALIC),
        ))];
    }

    feed.blocks()
        .iter()
        .skip(state.feed_scroll)
        .flat_map(|block| block_lines(block, state))
        .collect()
}

/// Render the feed container
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = format!(" Posts ({}) ", state.feed.len());
    let feed = Paragraph::new(feed_lines(&state.feed, state))
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: false });

    frame.render_widget(feed, area);
}
