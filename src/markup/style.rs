//! Inline style markers and their nesting state.

/// Inline style delimiter recognized by the converter.
///
/// All markers except [`StyleMarker::Backtick`] are written doubled
/// (`**bold**`). The backtick toggles on a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMarker {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Monospace,
    Backtick,
}

impl StyleMarker {
    /// Returns marker for a delimiter character.
    ///
    /// # Examples
    ///
    /// ```
    /// use remarkup::StyleMarker;
    ///
    /// assert_eq!(StyleMarker::from_char('*'), Some(StyleMarker::Bold));
    /// assert_eq!(StyleMarker::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(Self::Bold),
            '/' => Some(Self::Italic),
            '_' => Some(Self::Underline),
            '~' => Some(Self::Strikethrough),
            '#' => Some(Self::Monospace),
            '`' => Some(Self::Backtick),
            _ => None,
        }
    }

    /// HTML element name this marker toggles.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::Strikethrough => "s",
            Self::Monospace | Self::Backtick => "pre",
        }
    }

    /// Whether the delimiter must be doubled to take effect.
    pub fn is_doubled(self) -> bool {
        !matches!(self, Self::Backtick)
    }
}

/// LIFO record of currently open style markers.
///
/// A marker closes only when it is on top of the stack. Any other
/// occurrence opens a new level, so mismatched closes nest further
/// instead of being corrected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleStack {
    open: Vec<StyleMarker>,
}

impl StyleStack {
    /// Opens or closes `marker`.
    ///
    /// # Returns
    ///
    /// `true` if the marker was opened, `false` if it closed the top entry
    pub fn toggle(&mut self, marker: StyleMarker) -> bool {
        if self.open.last() == Some(&marker) {
            self.open.pop();
            false
        } else {
            self.open.push(marker);
            true
        }
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// One character lookahead for delimiters that only count when doubled.
///
/// The first delimiter character is held back. The next character decides
/// whether it was half of a delimiter or ordinary punctuation that has to
/// be written out literally.
#[derive(Debug, Default)]
pub struct Lookahead {
    pending: Option<char>,
}

impl Lookahead {
    /// Holds `c` back, returning whatever was pending before.
    pub fn hold(&mut self, c: char) -> Option<char> {
        self.pending.replace(c)
    }

    /// Consumes the pending character if it equals `c`.
    pub fn pair_with(&mut self, c: char) -> bool {
        if self.pending == Some(c) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Releases the pending character for literal output.
    pub fn take(&mut self) -> Option<char> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_tags() {
        assert_eq!(StyleMarker::Bold.tag(), "b");
        assert_eq!(StyleMarker::Italic.tag(), "i");
        assert_eq!(StyleMarker::Underline.tag(), "u");
        assert_eq!(StyleMarker::Strikethrough.tag(), "s");
        assert_eq!(StyleMarker::Monospace.tag(), "pre");
        assert_eq!(StyleMarker::Backtick.tag(), "pre");
    }

    #[test]
    fn test_non_marker_characters() {
        for c in ['-', '=', '[', '{', 'a', ' '] {
            assert_eq!(StyleMarker::from_char(c), None, "{:?} is not a marker", c);
        }
    }

    #[test]
    fn test_only_backtick_is_single() {
        assert!(!StyleMarker::Backtick.is_doubled());
        assert!(StyleMarker::Bold.is_doubled());
        assert!(StyleMarker::Monospace.is_doubled());
    }

    #[test]
    fn test_stack_nested_toggle() {
        // Arrange
        let mut stack = StyleStack::default();

        // Act & Assert
        assert!(stack.toggle(StyleMarker::Bold), "First bold opens");
        assert!(stack.toggle(StyleMarker::Underline), "Underline opens inside");
        assert_eq!(stack.depth(), 2);
        assert!(!stack.toggle(StyleMarker::Underline), "Underline closes");
        assert!(!stack.toggle(StyleMarker::Bold), "Bold closes");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_mismatched_close_opens_again() {
        // Arrange
        let mut stack = StyleStack::default();
        stack.toggle(StyleMarker::Bold);
        stack.toggle(StyleMarker::Italic);

        // Act
        let opened = stack.toggle(StyleMarker::Bold);

        // Assert
        assert!(opened, "Bold below the top must not be closed");
        assert_eq!(stack.depth(), 3);
    }

    #[test]
    fn test_lookahead_pairs_same_character() {
        // Arrange
        let mut lookahead = Lookahead::default();
        lookahead.hold('*');

        // Act & Assert
        assert!(!lookahead.pair_with('/'));
        assert!(lookahead.pair_with('*'));
        assert_eq!(lookahead.take(), None);
    }

    #[test]
    fn test_lookahead_hold_returns_previous() {
        // Arrange
        let mut lookahead = Lookahead::default();

        // Act
        let first = lookahead.hold('*');
        let second = lookahead.hold('/');

        // Assert
        assert_eq!(first, None);
        assert_eq!(second, Some('*'));
        assert_eq!(lookahead.take(), Some('/'));
    }
}
