//! Line-start block detectors.
//!
//! Each detector looks at the text starting at the first character of a
//! line and either recognizes a complete block or declines. Recognized
//! blocks carry the index where inline scanning resumes, so the converter
//! never sees their characters again.

/// Minimum left margin of an indented pre block, also the amount stripped.
const MIN_INDENT: usize = 2;

const FENCE: [char; 3] = ['`', '`', '`'];

/// Block region recognized at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `== Title ==` header. `end` points at the line's newline.
    Header {
        level: usize,
        text: String,
        end: usize,
    },
    /// Line made only of `=` or `-`, a header underline when it follows a
    /// plain text line.
    Underline { level: usize, end: usize },
    /// Lines indented by two or more spaces, margin stripped.
    IndentedPre {
        content: String,
        end: usize,
        trailing_break: bool,
    },
    /// Lines between two triple backtick fences.
    FencedPre { content: String, end: usize },
}

impl Block {
    /// Index where scanning resumes after this block.
    pub fn end(&self) -> usize {
        match self {
            Block::Header { end, .. }
            | Block::Underline { end, .. }
            | Block::IndentedPre { end, .. }
            | Block::FencedPre { end, .. } => *end,
        }
    }

    /// Short block name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Block::Header { .. } => "header",
            Block::Underline { .. } => "underline",
            Block::IndentedPre { .. } => "indented pre",
            Block::FencedPre { .. } => "fenced pre",
        }
    }
}

/// Whether `at` is the first character of a line.
pub fn is_line_start(chars: &[char], at: usize) -> bool {
    at == 0 || chars.get(at - 1) == Some(&'\n')
}

/// Index of the next newline at or after `from`, or the text length.
pub fn line_end(chars: &[char], from: usize) -> usize {
    chars
        .get(from..)
        .and_then(|rest| rest.iter().position(|&c| c == '\n'))
        .map_or(chars.len(), |offset| from + offset)
}

/// Runs all detectors in priority order: header, indented pre, fenced pre.
///
/// # Arguments
///
/// * `chars`: Whole input text
/// * `at`: First character of the line to inspect
///
/// # Returns
///
/// Recognized block, or None if the line is ordinary text
pub fn detect(chars: &[char], at: usize) -> Option<Block> {
    if !is_line_start(chars, at) {
        return None;
    }

    header(chars, at)
        .or_else(|| indented_pre(chars, at))
        .or_else(|| fenced_pre(chars, at))
}

/// Detects `=` headers and `=`/`-` underlines.
///
/// The leading `=` count is the header level, no cap applied. Header text
/// runs to the next `=` on the line and is trimmed, so trailing `=` are
/// optional. A line consisting only of one repeated `=` or `-` is reported
/// as an underline: level 1 for `=`, level 2 for `-`.
fn header(chars: &[char], at: usize) -> Option<Block> {
    let first = *chars.get(at)?;
    if first != '=' && first != '-' {
        return None;
    }

    let run = chars[at..].iter().take_while(|&&c| c == first).count();
    let eol = line_end(chars, at + run);

    if eol == at + run {
        let level = if first == '=' { 1 } else { 2 };
        return Some(Block::Underline { level, end: eol });
    }

    if first == '-' {
        return None;
    }

    let text_start = at + run;
    let text_end = chars[text_start..eol]
        .iter()
        .position(|&c| c == '=')
        .map_or(eol, |offset| text_start + offset);
    let text: String = chars[text_start..text_end].iter().collect();

    Some(Block::Header {
        level: run,
        text: text.trim().to_string(),
        end: eol,
    })
}

/// Detects a run of lines indented by at least two spaces.
///
/// Exactly two spaces are stripped from every line, deeper indentation
/// stays. Each line keeps its newline. The first line without the margin
/// ends the block; when that line is blank its newline belongs to the
/// block and is rendered as the break following `</pre>`.
fn indented_pre(chars: &[char], at: usize) -> Option<Block> {
    let mut pos = at;
    let mut content = String::new();
    let mut lines = 0;

    while has_margin(chars, pos) {
        let start = pos + MIN_INDENT;
        let stop = (line_end(chars, start) + 1).min(chars.len());
        content.extend(&chars[start..stop]);
        pos = stop;
        lines += 1;
    }

    if lines == 0 {
        return None;
    }

    let trailing_break = pos < chars.len();
    let end = if chars.get(pos) == Some(&'\n') {
        pos + 1
    } else {
        pos
    };

    Some(Block::IndentedPre {
        content,
        end,
        trailing_break,
    })
}

fn has_margin(chars: &[char], at: usize) -> bool {
    chars
        .get(at..at + MIN_INDENT)
        .is_some_and(|margin| margin.iter().all(|&c| c == ' '))
}

/// Detects a block fenced by lines of three backticks.
///
/// Content is taken verbatim. Without a closing fence the block extends
/// to the end of the text.
fn fenced_pre(chars: &[char], at: usize) -> Option<Block> {
    let eol = line_end(chars, at);
    if !is_fence(&chars[at..eol]) {
        return None;
    }

    let body = (eol + 1).min(chars.len());
    let mut line = body;
    while line < chars.len() {
        let line_eol = line_end(chars, line);
        if is_fence(&chars[line..line_eol]) {
            return Some(Block::FencedPre {
                content: chars[body..line].iter().collect(),
                end: line_eol,
            });
        }
        line = line_eol + 1;
    }

    Some(Block::FencedPre {
        content: chars[body..].iter().collect(),
        end: chars.len(),
    })
}

fn is_fence(line: &[char]) -> bool {
    let len = line
        .iter()
        .rposition(|c| !c.is_whitespace())
        .map_or(0, |last| last + 1);
    line[..len] == FENCE
}
