//! `.env` emission and parsing.
//!
//! Export writes resolved values verbatim, one `KEY=value` per line. Import
//! reads the looser dotenv dialect people actually commit: comments, quoted
//! values, and `export ` prefixes.

#[cfg(unix)]
use std::io::Write;
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::plugin::ResolvedEntry;
use crate::error::Result;

/// Render resolved entries as `.env` text.
///
/// Values are not quoted. A key whose resolver returned nothing renders as
/// the literal `null`.
pub fn entries_to_env_file(entries: &[ResolvedEntry]) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::new());
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value.as_deref().unwrap_or("null"));
    }
    out.push('\n');
    out
}

/// Write `.env` text, owner read/write only on Unix.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn write_env_file(path: &Path, content: &str) -> Result<()> {
    debug!(path = %path.display(), "writing env file");

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        // mode() only applies on create
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

/// Parse `.env` text into ordered key/value pairs.
///
/// Blank lines and `#` comments are skipped, as are lines without `=`.
/// A later duplicate key overrides the earlier value in place.
pub fn parse(content: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = parse_value(value.trim());

        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value,
            None => entries.push((key.to_string(), value)),
        }
    }

    entries
}

/// Read and parse a `.env` file.
pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
    debug!(path = %path.display(), "reading env file");
    let content = Zeroizing::new(std::fs::read_to_string(path)?);
    Ok(parse(&content))
}

fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }
    // unquoted values may carry an inline comment
    match raw.find(" #") {
        Some(i) => raw[..i].trim_end().to_string(),
        None => raw.to_string(),
    }
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
