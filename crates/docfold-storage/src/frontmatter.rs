//! YAML frontmatter parsing.
//!
//! Markdown files may start with a YAML block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: Introducción
//! description: Bienvenida al tutorial
//! ---
//!
//! # Introducción
//! ```
//!
//! Unknown frontmatter keys are ignored.

use serde::Deserialize;

/// Parsed frontmatter fields.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Frontmatter {
    /// Title override; takes precedence over the first H1 heading.
    pub title: Option<String>,
    /// Page description.
    pub description: Option<String>,
}

/// Split a document into frontmatter and markdown body.
///
/// Returns `(None, content)` when no frontmatter delimiter is present.
/// The returned body excludes the frontmatter block.
///
/// # Errors
///
/// Returns a `serde_yaml` error if the delimited block is not valid YAML.
pub fn split_frontmatter(content: &str) -> Result<(Option<Frontmatter>, &str), serde_yaml::Error> {
    let Some(rest) = strip_open_delimiter(content) else {
        return Ok((None, content));
    };

    let Some((block, body)) = find_close_delimiter(rest) else {
        // Opening delimiter without a closing one is treated as content.
        return Ok((None, content));
    };

    if block.trim().is_empty() {
        return Ok((Some(Frontmatter::default()), body));
    }

    let frontmatter: Frontmatter = serde_yaml::from_str(block)?;
    Ok((Some(frontmatter), body))
}

/// Strip a leading `---` line, returning the remainder.
fn strip_open_delimiter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    match rest.strip_prefix('\n') {
        Some(r) => Some(r),
        None => rest.strip_prefix("\r\n"),
    }
}

/// Find the closing `---` line, returning (block, body after delimiter).
fn find_close_delimiter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &rest[offset + line.len()..];
            return Some((&rest[..offset], body));
        }
        offset += line.len();
    }
    None
}
