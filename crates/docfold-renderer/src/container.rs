//! Custom container preprocessing.
//!
//! Containers use triple-colon fences:
//!
//! ```markdown
//! ::: warning advertencia
//! Este tutorial requiere conocer los conceptos básicos.
//! :::
//! ```
//!
//! The fences are replaced with raw HTML block lines before markdown
//! parsing; content between them stays markdown. Fences inside code blocks
//! are left untouched.

use crate::html::escape_html;

/// Container kinds recognized by the preprocessor.
const KINDS: [&str; 5] = ["tip", "warning", "danger", "info", "details"];

/// Replace `:::` container fences with HTML block markup.
///
/// Returns the rewritten markdown plus warnings for containers left open
/// at end of input (these are closed implicitly).
pub(crate) fn preprocess(markdown: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(markdown.len());
    let mut warnings = Vec::new();
    let mut open: Vec<&'static str> = Vec::new();
    let mut in_code_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim_end();

        if is_code_fence(trimmed) {
            in_code_fence = !in_code_fence;
            out.push_str(line);
            out.push('\n');
            continue;
        }
        if in_code_fence || !trimmed.starts_with(":::") {
            out.push_str(line);
            out.push('\n');
            continue;
        }

        let rest = trimmed.trim_start_matches(':').trim();
        if rest.is_empty() {
            match open.pop() {
                Some(closing) => {
                    out.push('\n');
                    out.push_str(closing);
                    out.push('\n');
                }
                // Dangling close fence passes through unchanged.
                None => {
                    out.push_str(line);
                    out.push('\n');
                }
            }
            continue;
        }

        let (kind_word, title) = match rest.split_once(char::is_whitespace) {
            Some((k, t)) => (k, t.trim()),
            None => (rest, ""),
        };
        let Some(kind) = KINDS.iter().find(|k| **k == kind_word) else {
            // Unknown container kind passes through unchanged.
            out.push_str(line);
            out.push('\n');
            continue;
        };

        if *kind == "details" {
            let summary = if title.is_empty() { "Details" } else { title };
            out.push_str(&format!(
                "<details class=\"details custom-block\"><summary>{}</summary>\n\n",
                escape_html(summary)
            ));
            open.push("</details>");
        } else {
            let block_title = if title.is_empty() {
                kind.to_uppercase()
            } else {
                title.to_owned()
            };
            out.push_str(&format!(
                "<div class=\"{kind} custom-block\"><p class=\"custom-block-title\">{}</p>\n\n",
                escape_html(&block_title)
            ));
            open.push("</div>");
        }
    }

    while let Some(closing) = open.pop() {
        warnings.push("Container fence not closed before end of document".to_owned());
        out.push('\n');
        out.push_str(closing);
        out.push('\n');
    }

    (out, warnings)
}

/// True for a code-fence line, allowing up to three leading spaces as
/// CommonMark does. Four or more spaces make an indented code block.
fn is_code_fence(line: &str) -> bool {
    let stripped = line.trim_start_matches(' ');
    if line.len() - stripped.len() > 3 {
        return false;
    }
    stripped.starts_with("```") || stripped.starts_with("~~~")
}
