//! Line lexer for stack files.
//!
//! Every line is exactly one of three tokens:
//!
//! ```text
//! [SECTION_NAME]        -> Line::Section("SECTION_NAME")
//!   key?: value ; note  -> Line::Property { key: "key?", raw: " value ; note" }
//! anything else         -> Line::Ignored
//! ```
//!
//! Section headers are checked first, so `[A]: x` is a header.
//!
//! A property's raw text stops at its second colon: `path: a:b` lexes to
//! `raw: " a"`, so values holding a colon do not survive a round trip.

/// A classified stack-file line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `[NAME]` where NAME is one or more of `A-Z` and `_`.
    Section(&'a str),
    /// Text before the first `:` of a trimmed line, and the text between
    /// that colon and the next one.
    Property { key: &'a str, raw: &'a str },
    /// Blank lines, free text, lines without a colon.
    Ignored,
}

/// Classify a single line (without its trailing newline).
pub fn lex_line(line: &str) -> Line<'_> {
    if let Some(name) = section_name(line) {
        return Line::Section(name);
    }

    let mut parts = line.trim().split(':');
    match (parts.next(), parts.next()) {
        (Some(key), Some(raw)) if !key.trim().is_empty() => Line::Property {
            key: key.trim(),
            raw,
        },
        _ => Line::Ignored,
    }
}

/// Lex a whole document, one token per `\n`-separated line.
pub fn lex(content: &str) -> impl Iterator<Item = Line<'_>> {
    content.split('\n').map(lex_line)
}

fn section_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest
        .find(|c: char| !(c.is_ascii_uppercase() || c == '_'))
        .unwrap_or(rest.len());
    if end == 0 || !rest[end..].starts_with(']') {
        return None;
    }
    Some(&rest[..end])
}
