//! Stack-file format.
//!
//! Stack files, stack configs, and plugin descriptors all share one
//! line-oriented text format:
//!
//! ```text
//! [PORT]
//!   path: "/app/port"
//!   description?: "http port"; shown in docs
//!
//! [DATABASE_URL]
//!   path: "/app/db"
//!   resolver?: "ssm"
//! ```
//!
//! Parsing is permissive: lines that are neither a section header nor a
//! property are skipped, and properties before the first header are
//! dropped. Values are JSON when they decode as JSON and raw text otherwise.
//!
//! Serializing re-derives the `?` marker from a [`RequiredProps`] whitelist
//! instead of remembering how a key was written. A document parsed with
//! `description:` and written back with the default whitelist therefore
//! comes out as `description?:`.

mod document;
mod lexer;
mod value;

pub use document::{CommentMap, Section, StackDocument};
pub use lexer::{lex, lex_line, Line};
pub use value::{decode, encode, split_comment};

use tracing::trace;

use crate::core::property::RequiredProps;

/// Parse stack-file text.
///
/// Comments are collected only when `store_comments` is set; otherwise the
/// returned [`CommentMap`] is empty.
pub fn parse_stack_file(content: &str, store_comments: bool) -> (StackDocument, CommentMap) {
    let mut doc = StackDocument::new();
    let mut comments = CommentMap::new();
    let mut current: Option<&str> = None;

    for line in lex(content) {
        match line {
            Line::Section(name) => {
                doc.insert(name, Section::new());
                if store_comments {
                    comments.ensure_section(name);
                }
                current = Some(name);
            }
            Line::Property { key, raw } => {
                let Some(section) = current else {
                    trace!(key, "dropping property outside of a section");
                    continue;
                };
                let (text, comment) = split_comment(raw);
                doc.entry(section).insert(key.to_string(), decode(text));
                match comment {
                    Some(comment) if store_comments => comments.insert(section, key, comment),
                    _ => {}
                }
            }
            Line::Ignored => {}
        }
    }

    trace!(sections = doc.len(), "parsed stack file");
    (doc, comments)
}

/// Serialize a document back to stack-file text.
///
/// Keys not in `required` get a `?` marker unless they already end in one.
/// Sections are separated by a blank line and the text ends with exactly
/// one newline.
pub fn serialize_stack(
    doc: &StackDocument,
    comments: Option<&CommentMap>,
    required: &RequiredProps,
) -> String {
    let mut out = String::new();

    for (name, section) in doc.iter() {
        out.push('[');
        out.push_str(name);
        out.push_str("]\n");

        for (key, value) in section {
            out.push_str("  ");
            out.push_str(&required.marked_key(key));
            out.push_str(": ");
            out.push_str(&encode(value));

            let comment = comments
                .and_then(|c| c.get(name, key))
                .map(str::trim)
                .filter(|c| !c.is_empty());
            if let Some(comment) = comment {
                out.push_str("; ");
                out.push_str(comment);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    let mut text = out.trim().to_string();
    text.push('\n');
    text
}
