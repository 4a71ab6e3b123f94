//! Rich-text editor seam
//!
//! The body editor is an opaque widget owned by the front end. The composer
//! only needs to read its HTML and to clear it.

/// A rich-text editing widget
pub trait RichTextEditor {
    /// Current content as HTML markup
    fn html(&self) -> String;

    /// Clear the content
    fn reset(&mut self);

    fn is_empty(&self) -> bool;
}

/// An editor that just holds markup
///
/// Used headless and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlBuffer {
    html: String,
}

impl HtmlBuffer {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn set(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }
}

impl RichTextEditor for HtmlBuffer {
    fn html(&self) -> String {
        self.html.clone()
    }

    fn reset(&mut self) {
        self.html.clear();
    }

    fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Escape text for inclusion in HTML element content
pub fn escape_text(text: &str) -> String {
    askama_escape::escape(text, askama_escape::Html).to_string()
}

/// Markup for plain text lines, one paragraph per line
///
/// Blank lines become `<p><br></p>` so vertical spacing survives. All-blank
/// input yields an empty string.
pub fn paragraphs<S: AsRef<str>>(lines: &[S]) -> String {
    if lines.iter().all(|l| l.as_ref().trim().is_empty()) {
        return String::new();
    }
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if line.is_empty() {
                "<p><br></p>".to_string()
            } else {
                format!("<p>{}</p>", escape_text(line))
            }
        })
        .collect()
}
