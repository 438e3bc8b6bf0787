//! Output buffer with mark and rewind support.

use super::style::StyleStack;

/// Snapshot of converter output taken at a boundary in the source text.
///
/// Rewinding to a mark truncates everything emitted after it and restores
/// the style stack to the state it had when the mark was taken.
#[derive(Debug, Clone, Default)]
pub struct Mark {
    /// Character index in the source text where the mark was taken.
    pub source: usize,
    output_len: usize,
    styles: StyleStack,
}

/// Growable HTML output for a single conversion.
///
/// Emission is append only. Constructs whose extent is only known after
/// part of them was already emitted (Setext headers, bare URLs) take a
/// [`Mark`] up front and rewind to it once the boundary is decided.
#[derive(Debug, Default)]
pub struct HtmlBuffer {
    html: String,
}

impl HtmlBuffer {
    /// Creates buffer sized for input of the given length.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            html: String::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, c: char) {
        self.html.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.html.push_str(s);
    }

    /// Appends line break marker.
    pub fn line_break(&mut self) {
        self.html.push_str("<br>");
    }

    /// Appends `<tag>` or `</tag>`.
    pub fn tag(&mut self, name: &str, closing: bool) {
        self.html.push('<');
        if closing {
            self.html.push('/');
        }
        self.html.push_str(name);
        self.html.push('>');
    }

    /// Appends `<hN>text</hN>` for header level `N`.
    pub fn heading(&mut self, level: usize, text: &str) {
        let tag = format!("h{}", level);
        self.tag(&tag, false);
        self.html.push_str(text);
        self.tag(&tag, true);
    }

    /// Appends anchor pointing at `href` with the given label.
    pub fn anchor(&mut self, href: &str, label: &str) {
        self.open_anchor(href);
        self.html.push_str(label);
        self.html.push_str("</a>");
    }

    /// Appends opening anchor tag only.
    pub fn open_anchor(&mut self, href: &str) {
        self.html.push_str("<a href=\"");
        self.html.push_str(href);
        self.html.push_str("\">");
    }

    /// Records current output position and style state.
    ///
    /// # Arguments
    ///
    /// * `source`: Character index in the source text the mark belongs to
    /// * `styles`: Style stack at this point
    pub fn mark(&self, source: usize, styles: &StyleStack) -> Mark {
        Mark {
            source,
            output_len: self.html.len(),
            styles: styles.clone(),
        }
    }

    /// Discards output emitted after `mark` and restores its style stack.
    ///
    /// Marks taken after the one being rewound to become invalid.
    pub fn rewind(&mut self, mark: &Mark, styles: &mut StyleStack) {
        log::trace!(
            "rewinding {} bytes of output to source index {}",
            self.html.len().saturating_sub(mark.output_len),
            mark.source
        );
        self.html.truncate(mark.output_len);
        styles.clone_from(&mark.styles);
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}
