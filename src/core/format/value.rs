//! Property value text: comment splitting and JSON coding.

use serde_json::Value;

/// Split raw property text into value text and an optional comment.
///
/// The boundary is the first `;` immediately followed by whitespace.
/// Value text is trimmed; the comment is trimmed and dropped when empty.
pub fn split_comment(raw: &str) -> (&str, Option<&str>) {
    let boundary = raw.char_indices().find(|&(i, c)| {
        c == ';'
            && raw[i + 1..]
                .chars()
                .next()
                .map_or(false, char::is_whitespace)
    });

    match boundary {
        Some((i, _)) => {
            let comment = raw[i + 1..].trim();
            let comment = if comment.is_empty() { None } else { Some(comment) };
            (raw[..i].trim(), comment)
        }
        None => (raw.trim(), None),
    }
}

/// Decode value text as JSON, falling back to the text itself.
pub fn decode(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Encode a value back to its on-disk text.
pub fn encode(value: &Value) -> String {
    value.to_string()
}
