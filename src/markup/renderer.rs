//! Remarkup to HTML conversion.

use anyhow::{Context, Result};
use std::path::Path;

use super::blocks::{self, Block};
use super::buffer::{HtmlBuffer, Mark};
use super::links::{self, BracketLink, Closers, ReferenceResolver};
use super::style::{Lookahead, StyleMarker, StyleStack};

/// Renders remarkup text to an HTML fragment.
///
/// Supports bold, italic, underline, strikethrough and monospace styles,
/// `=` headers with both prefix and underline forms, indented and fenced
/// pre blocks, bracketed and bare hyperlinks, and `{T123}` style object
/// references resolved against the configured base URL.
///
/// Conversion never fails. Markup that cannot be interpreted is written out
/// as the literal text it came from. Text is not HTML escaped.
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    resolver: ReferenceResolver,
}

impl MarkupRenderer {
    /// Creates renderer resolving object references under `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url`: Server URL prefixed to `{T123}` style references
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            resolver: ReferenceResolver::new(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        self.resolver.base_url()
    }

    /// Renders remarkup content to HTML string.
    ///
    /// # Arguments
    ///
    /// * `content`: Remarkup text, may contain newlines
    ///
    /// # Returns
    ///
    /// HTML fragment without document wrapper
    ///
    /// # Examples
    ///
    /// ```
    /// use remarkup::MarkupRenderer;
    ///
    /// let renderer = MarkupRenderer::new("http://x.test");
    /// assert_eq!(renderer.render("foo **bar** baz"), "foo <b>bar</b> baz");
    /// assert_eq!(
    ///     renderer.render("{T5}"),
    ///     "<a href=\"http://x.test/T5\">http://x.test/T5</a>"
    /// );
    /// ```
    pub fn render(&self, content: &str) -> String {
        Conversion::new(content, &self.resolver).run()
    }

    /// Renders remarkup file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or is not valid UTF8
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read remarkup file: {}", path.display()))?;
        Ok(self.render(&content))
    }
}

/// State of the bracketed link being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Closed,
    /// Anchor tag emitted, label in progress.
    Anchor,
    /// Target was not linkable, the closing brackets are dropped.
    Swallowed,
}

/// Output mark plus the converter state it has to restore.
#[derive(Debug, Clone)]
struct Checkpoint {
    mark: Mark,
    link: LinkState,
}

/// Single left to right scan over one input text.
struct Conversion<'a> {
    chars: Vec<char>,
    resolver: &'a ReferenceResolver,
    out: HtmlBuffer,
    styles: StyleStack,
    lookahead: Lookahead,
    closers: Closers,
    link: LinkState,
    /// Start of the whitespace delimited token under the cursor.
    word: Checkpoint,
    /// Start of the current line, if it is plain text.
    line: Option<Checkpoint>,
}

impl<'a> Conversion<'a> {
    fn new(content: &str, resolver: &'a ReferenceResolver) -> Self {
        let out = HtmlBuffer::with_capacity(content.len());
        let styles = StyleStack::default();
        let word = Checkpoint {
            mark: out.mark(0, &styles),
            link: LinkState::Closed,
        };

        Self {
            chars: content.chars().collect(),
            resolver,
            out,
            styles,
            lookahead: Lookahead::default(),
            closers: Closers::default(),
            link: LinkState::Closed,
            word,
            line: None,
        }
    }

    fn run(mut self) -> String {
        let mut pos = 0;

        while pos < self.chars.len() {
            if blocks::is_line_start(&self.chars, pos)
                && let Some(next) = self.line_start(pos)
            {
                pos = next;
                continue;
            }

            pos = self.scan(pos);
        }

        self.flush();
        if !self.styles.is_empty() {
            log::debug!("{} styles left open at end of text", self.styles.depth());
        }
        log::trace!(
            "closer lookups scanned {} of {} chars",
            self.closers.scanned(),
            self.chars.len()
        );
        log::trace!("rendered: {}", self.out.as_str());
        self.out.into_string()
    }

    /// Handles the first character of a line.
    ///
    /// Returns the resume index when a block consumed the line, or None
    /// when the line is plain text to be scanned inline.
    fn line_start(&mut self, pos: usize) -> Option<usize> {
        let previous = self.line.take();

        match blocks::detect(&self.chars, pos) {
            Some(Block::Underline { level, end }) => {
                if let Some(previous) = previous
                    && let Some(text) = self.line_text(previous.mark.source, pos)
                {
                    log::debug!("underline at {} turns previous line into h{}", pos, level);
                    self.restore(&previous);
                    self.out.heading(level, &text);
                    return Some(self.finish_block(end));
                }
            }
            Some(block) => {
                log::debug!("{} block at {}..{}", block.name(), pos, block.end());
                self.flush();
                let end = block.end();
                self.emit_block(block);
                return Some(self.finish_block(end));
            }
            None => {}
        }

        let checkpoint = self.checkpoint(pos);
        self.word = checkpoint.clone();
        self.line = Some(checkpoint);
        None
    }

    /// Trimmed raw text of the line spanning `start` up to the newline
    /// right before `next_line`, if it is not blank.
    fn line_text(&self, start: usize, next_line: usize) -> Option<String> {
        let raw: String = self.chars[start..next_line - 1].iter().collect();
        let text = raw.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    fn emit_block(&mut self, block: Block) {
        match block {
            Block::Header { level, text, .. } => self.out.heading(level, &text),
            Block::IndentedPre {
                content,
                trailing_break,
                ..
            } => {
                self.pre(&content);
                if trailing_break {
                    self.out.line_break();
                }
            }
            Block::FencedPre { content, .. } => self.pre(&content),
            Block::Underline { .. } => {}
        }
    }

    fn pre(&mut self, content: &str) {
        self.out.tag("pre", false);
        self.out.push_str(content);
        self.out.tag("pre", true);
    }

    fn finish_block(&mut self, end: usize) -> usize {
        self.word = self.checkpoint(end);
        end
    }

    /// Dispatches one character outside block regions, returning the next
    /// index to scan.
    fn scan(&mut self, pos: usize) -> usize {
        let c = self.chars[pos];

        if c == ':' && links::is_scheme_separator(&self.chars, pos) {
            return self.bare_url(pos);
        }

        match c {
            '[' => {
                if self.lookahead.pair_with('[') {
                    return self.bracket_link(pos + 1);
                }
                self.hold(c);
            }
            ']' => {
                if self.lookahead.pair_with(']') {
                    self.close_link(pos + 1);
                } else {
                    self.hold(c);
                }
            }
            '{' => {
                self.flush();
                let close = self.closers.brace(&self.chars, pos + 1);
                if let Some(body) = links::reference_body(&self.chars, pos, close)
                    && let Some(url) = self.resolver.resolve(&body)
                {
                    self.out.anchor(&url, &url);
                    let resume = pos + body.chars().count() + 2;
                    self.word = self.checkpoint(resume);
                    return resume;
                }
                self.out.push(c);
            }
            '\n' => {
                self.flush();
                self.out.line_break();
                self.word = self.checkpoint(pos + 1);
            }
            _ => match StyleMarker::from_char(c) {
                Some(marker) if !marker.is_doubled() => {
                    self.flush();
                    self.toggle(marker);
                }
                Some(marker) => {
                    if self.lookahead.pair_with(c) {
                        self.toggle(marker);
                    } else {
                        self.hold(c);
                    }
                }
                None => {
                    self.flush();
                    self.out.push(c);
                    if c.is_whitespace() {
                        self.word = self.checkpoint(pos + 1);
                    }
                }
            },
        }

        pos + 1
    }

    fn toggle(&mut self, marker: StyleMarker) {
        let opened = self.styles.toggle(marker);
        log::trace!(
            "{} {:?}, style depth {}",
            if opened { "open" } else { "close" },
            marker,
            self.styles.depth()
        );
        self.out.tag(marker.tag(), !opened);
    }

    /// Holds a possible delimiter back, releasing the one held before.
    fn hold(&mut self, c: char) {
        if let Some(previous) = self.lookahead.hold(c) {
            self.out.push(previous);
        }
    }

    /// Writes out a held back delimiter as literal text.
    fn flush(&mut self) {
        if let Some(pending) = self.lookahead.take() {
            self.out.push(pending);
        }
    }

    /// Rewrites the token around a `://` at `separator` as a link to itself.
    ///
    /// The token reaches back to the last whitespace (or line start, or
    /// end of a consumed construct) and forward to the next whitespace.
    /// Whatever was already emitted for its left part is discarded.
    fn bare_url(&mut self, separator: usize) -> usize {
        let start = self.word.mark.source;
        let end = links::url_end(&self.chars, separator);
        let url: String = self.chars[start..end].iter().collect();

        self.lookahead.take();
        let word = self.word.clone();
        self.restore(&word);
        self.out.anchor(&url, &url);
        self.word = self.checkpoint(end);

        end
    }

    /// Handles the head of a `[[ URL | LABEL ]]` link. `at` is the index
    /// right after the opening brackets.
    fn bracket_link(&mut self, at: usize) -> usize {
        let link = links::bracket_link(&self.chars, at, &mut self.closers);
        if let Some(
            BracketLink::Labeled { resume, .. } | BracketLink::Bare { resume, .. },
        ) = &link
            && self.chars[at..*resume].contains(&'\n')
        {
            // Lines starting inside the head never reach line_start.
            self.line = None;
        }

        match link {
            Some(BracketLink::Labeled { url, resume }) => {
                if links::is_linkable(&url) {
                    self.out.open_anchor(&url);
                    self.link = LinkState::Anchor;
                } else {
                    log::debug!("dropping link with unsupported target {:?}", url);
                    self.link = LinkState::Swallowed;
                }
                self.word = self.checkpoint(resume);
                resume
            }
            Some(BracketLink::Bare { url, resume }) => {
                if links::is_linkable(&url) {
                    self.out.anchor(&url, &url);
                } else {
                    self.out.push_str(&url);
                }
                self.word = self.checkpoint(resume);
                resume
            }
            None => {
                self.out.push_str("[[");
                at
            }
        }
    }

    /// Handles `]]`, with `resume` the index right after it.
    fn close_link(&mut self, resume: usize) {
        match self.link {
            LinkState::Anchor => self.out.push_str("</a>"),
            LinkState::Swallowed => {}
            LinkState::Closed => {
                self.out.push_str("]]");
                return;
            }
        }
        self.link = LinkState::Closed;
        self.word = self.checkpoint(resume);
    }

    fn checkpoint(&self, source: usize) -> Checkpoint {
        Checkpoint {
            mark: self.out.mark(source, &self.styles),
            link: self.link,
        }
    }

    fn restore(&mut self, checkpoint: &Checkpoint) {
        self.out.rewind(&checkpoint.mark, &mut self.styles);
        self.link = checkpoint.link;
    }
}
