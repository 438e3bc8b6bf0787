//! Hyperlink detection: reference tokens, bare URLs and bracketed links.

/// Object kinds that may be referenced with `{X123}` tokens.
///
/// `T` is a task, `D` a differential revision and `F` a file.
const REFERENCE_KINDS: [char; 3] = ['T', 'D', 'F'];

/// Resolves short reference tokens to absolute object URLs.
///
/// A token body such as `T42` becomes `<base>/T42`. The base URL is used
/// verbatim; callers strip trailing slashes if they need to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceResolver {
    base_url: String,
}

impl ReferenceResolver {
    /// Creates resolver for objects hosted under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves reference body to absolute URL.
    ///
    /// The body must be one of the known kind letters followed by one or
    /// more ASCII digits, with nothing else around them.
    ///
    /// # Arguments
    ///
    /// * `body`: Token text between the braces, like `T42`
    ///
    /// # Returns
    ///
    /// Absolute URL, or None if the body is not a valid reference
    ///
    /// # Examples
    ///
    /// ```
    /// use remarkup::ReferenceResolver;
    ///
    /// let resolver = ReferenceResolver::new("http://x.test");
    /// assert_eq!(resolver.resolve("T5").as_deref(), Some("http://x.test/T5"));
    /// assert_eq!(resolver.resolve("T5 "), None);
    /// ```
    pub fn resolve(&self, body: &str) -> Option<String> {
        let mut chars = body.chars();
        let kind = chars.next()?;
        if !REFERENCE_KINDS.contains(&kind) {
            return None;
        }

        let number = chars.as_str();
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(format!("{}/{}", self.base_url, body))
    }
}

/// Reference body of the token opened by the `{` at `at`.
///
/// `close` is the first `}` after the opening brace. The body must be a
/// known kind letter followed by one or more ASCII digits. Validation stops
/// at the first character that breaks this shape.
///
/// # Returns
///
/// Token body like `T42`, or None if the text at `at` is not a reference
pub fn reference_body(chars: &[char], at: usize, close: Option<usize>) -> Option<String> {
    let body = chars.get(at + 1..close?)?;
    let (kind, number) = body.split_first()?;
    if !REFERENCE_KINDS.contains(kind)
        || number.is_empty()
        || !number.iter().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    Some(body.iter().collect())
}

/// Memoized search for the next position matching a fixed pattern.
///
/// A result found from index `from` holds for every later query up to the
/// match itself, and a failed search holds for every later query. Queries
/// with increasing indices therefore scan each character at most once.
#[derive(Debug, Default)]
struct NextMatch {
    cached: Option<(usize, Option<usize>)>,
    scanned: usize,
}

impl NextMatch {
    fn find(
        &mut self,
        chars: &[char],
        at: usize,
        matches: impl Fn(&[char], usize) -> bool,
    ) -> Option<usize> {
        if let Some((from, found)) = self.cached
            && from <= at
            && found.is_none_or(|position| position >= at)
        {
            return found;
        }

        let found = (at..chars.len()).find(|&i| matches(chars, i));
        self.scanned += found.map_or(chars.len(), |position| position + 1) - at.min(chars.len());
        self.cached = Some((at, found));
        found
    }
}

/// Closing delimiter lookups shared by one left to right scan.
///
/// Each opener (`{` or `[[`) asks for the nearest closer after it. Answers
/// are memoized so unterminated openers do not rescan the rest of the text.
#[derive(Debug, Default)]
pub struct Closers {
    brace: NextMatch,
    brackets: NextMatch,
    pipe: NextMatch,
}

impl Closers {
    /// Index of the first `}` at or after `at`.
    pub fn brace(&mut self, chars: &[char], at: usize) -> Option<usize> {
        self.brace.find(chars, at, |chars, i| chars[i] == '}')
    }

    /// Index of the first `]]` at or after `at`.
    pub fn brackets(&mut self, chars: &[char], at: usize) -> Option<usize> {
        self.brackets
            .find(chars, at, |chars, i| chars[i] == ']' && chars.get(i + 1) == Some(&']'))
    }

    /// Index of the first `|` at or after `at`.
    pub fn pipe(&mut self, chars: &[char], at: usize) -> Option<usize> {
        self.pipe.find(chars, at, |chars, i| chars[i] == '|')
    }

    /// Characters examined by all lookups so far.
    pub fn scanned(&self) -> usize {
        self.brace.scanned + self.brackets.scanned + self.pipe.scanned
    }
}

/// Whether a `://` scheme separator starts at `at`.
pub fn is_scheme_separator(chars: &[char], at: usize) -> bool {
    chars.get(at..at + 3) == Some(&[':', '/', '/'][..])
}

/// Index of the first whitespace at or after `from`, or the text length.
pub fn url_end(chars: &[char], from: usize) -> usize {
    chars
        .get(from..)
        .and_then(|rest| rest.iter().position(|c| c.is_whitespace()))
        .map_or(chars.len(), |offset| from + offset)
}

/// Whether a bracketed link target gets an anchor.
pub fn is_linkable(url: &str) -> bool {
    url.starts_with("http")
}

/// Parsed head of a `[[ URL | LABEL ]]` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketLink {
    /// Label follows the `|` and is scanned as markup starting at `resume`.
    Labeled { url: String, resume: usize },
    /// No `|` before `]]`: the target is its own label. `resume` is past
    /// the closing brackets.
    Bare { url: String, resume: usize },
}

/// Parses link head following an opening `[[`.
///
/// The head runs up to the first `|` located before the first `]]`. A
/// link with neither `|` nor `]]` is not a link.
///
/// # Arguments
///
/// * `chars`: Whole input text
/// * `at`: Index right after the opening brackets
/// * `closers`: Lookups of the scan this link belongs to
pub fn bracket_link(chars: &[char], at: usize, closers: &mut Closers) -> Option<BracketLink> {
    let close = closers.brackets(chars, at);
    let pipe = closers
        .pipe(chars, at)
        .filter(|&pipe| close.is_none_or(|close| pipe < close));

    if let Some(pipe) = pipe {
        return Some(BracketLink::Labeled {
            url: collect_trimmed(&chars[at..pipe]),
            resume: pipe + 1,
        });
    }

    close.map(|close| BracketLink::Bare {
        url: collect_trimmed(&chars[at..close]),
        resume: close + 2,
    })
}

fn collect_trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim().to_string()
}
