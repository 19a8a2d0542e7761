//! Line-oriented INI reader.
//!
//! Each trimmed line is one of:
//! - blank or comment (`#`, `;`, or a leading `rem`, any case): skipped
//! - `[name]`: starts a section and ends any multi-line value
//! - `option = value` / `option: value`: split on the first `=` or `:`
//! - anything else right after an option: continuation of that value
//!
//! Option lines before the first header, or after an empty `[]` header, are
//! rejected. Bytes that are not valid UTF-8 are replaced, not rejected.

use std::io::BufRead;

use tracing::debug;

use crate::document::IniDocument;
use crate::error::IniError;

/// Inline comment markers. Only recognised after whitespace so that values
/// such as `a#b` or `x;y` survive.
const INLINE_COMMENT_MARKERS: [&str; 4] = [" ;", "\t;", " #", "\t#"];

/// Classification of one trimmed line, independent of parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    /// Header; inner text trimmed.
    Section(&'a str),
    /// Separator found past the first character. Both halves untrimmed.
    Pair { option: &'a str, value: &'a str },
    /// No usable separator: continuation or garbage depending on state.
    Bare(&'a str),
}

/// Classify an already trimmed line.
pub fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with(['#', ';'])
        || line.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rem"))
    {
        return Line::Comment;
    }
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Line::Section(line[1..line.len() - 1].trim());
    }
    match line.find(['=', ':']) {
        Some(i) if i > 0 => Line::Pair {
            option: &line[..i],
            value: &line[i + 1..],
        },
        _ => Line::Bare(line),
    }
}

/// Truncate at inline comment markers, applied one marker after another.
pub fn strip_comments(mut text: &str) -> &str {
    for marker in INLINE_COMMENT_MARKERS {
        if let Some(i) = text.find(marker) {
            text = &text[..i];
        }
    }
    text
}

/// Parse INI text from any buffered reader.
///
/// Input is read as bytes; invalid UTF-8 sequences are replaced with
/// U+FFFD rather than rejected.
///
/// # Errors
/// - `IniError::BlankSection` for an option before any header, or after an
///   empty `[]` header
/// - `IniError::CouldNotParse` for a line of no known shape
/// - `IniError::Read` if the reader fails before end of input
pub fn parse<R: BufRead>(mut reader: R) -> Result<IniDocument, IniError> {
    let mut doc = IniDocument::new();
    let mut section: Option<String> = None;
    let mut option: Option<String> = None;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim();

        match classify(line) {
            Line::Blank | Line::Comment => {}
            // `[]` names no section; following options are orphaned.
            Line::Section("") => {
                section = None;
                option = None;
            }
            Line::Section(name) => {
                doc.add_section(name);
                section = Some(name.to_string());
                option = None;
            }
            _ if section.is_none() => {
                return Err(IniError::BlankSection {
                    line_no,
                    line: line.to_string(),
                });
            }
            Line::Pair { option: name, value } => {
                let name = name.trim();
                let value = strip_comments(value).trim();
                let current = section.as_deref().unwrap_or_default();
                doc.add_option(current, name, value);
                option = Some(name.to_string());
            }
            Line::Bare(text) => {
                let (Some(current), Some(name)) = (section.as_deref(), option.as_deref()) else {
                    return Err(IniError::CouldNotParse {
                        line_no,
                        line: line.to_string(),
                    });
                };
                let prev = doc.get_raw(current, name).unwrap_or_default();
                let joined = format!("{prev}\n{}", strip_comments(text).trim());
                doc.add_option(current, name, joined);
            }
        }
    }

    debug!("Parsed {} INI sections", doc.section_count());
    Ok(doc)
}

/// Parse INI text held in memory.
pub fn parse_str(text: &str) -> Result<IniDocument, IniError> {
    parse(text.as_bytes())
}
