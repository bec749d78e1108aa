//! Shared text helpers for the page writer.
//!
//! Several helpers inspect output that has already been emitted, because
//! the destination markup engine is sensitive to the exact whitespace that
//! precedes lists and blocks.

/// Escape characters that would be read as HTML in markdown prose.
#[must_use]
pub(crate) fn escape_markup(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape HTML special characters, including quotes.
#[must_use]
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Length of the longest run of backticks in `s`.
#[must_use]
pub(crate) fn longest_backtick_run(s: &str) -> usize {
    s.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// Remove trailing spaces and tabs (not newlines) from emitted output.
pub(crate) fn trim_trailing_spaces(out: &mut String) {
    let trimmed = out.trim_end_matches([' ', '\t']).len();
    out.truncate(trimmed);
}

/// Whether emitted output ends in a newline once trailing spaces are ignored.
#[must_use]
pub(crate) fn ends_with_newline_ignoring_spaces(out: &str) -> bool {
    out.trim_end_matches([' ', '\t']).ends_with('\n')
}

/// Make sure the next write starts on a fresh line.
pub(crate) fn ensure_newline(out: &mut String) {
    if out.is_empty() {
        return;
    }
    if ends_with_newline_ignoring_spaces(out) {
        trim_trailing_spaces(out);
    } else {
        out.push('\n');
    }
}

/// Make emitted output end in exactly two newlines (one blank line).
///
/// Trailing spaces are trimmed first so the blank line is really blank.
/// Empty output is left alone.
pub(crate) fn ensure_blank_line(out: &mut String) {
    if out.is_empty() {
        return;
    }
    trim_trailing_spaces(out);
    let content_end = out.trim_end_matches('\n').len();
    out.truncate(content_end);
    if !out.is_empty() {
        out.push_str("\n\n");
    }
}

/// Indent every line after the first by `width` spaces. Blank lines stay empty.
#[must_use]
pub(crate) fn indent_continuation(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    let mut result = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
            if !line.is_empty() {
                result.push_str(&pad);
            }
        }
        result.push_str(line);
    }
    result
}

/// Prefix every line with a block quote marker.
#[must_use]
pub(crate) fn quote_lines(text: &str) -> String {
    text.trim_end_matches('\n')
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_owned()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fold multi-line cell content onto one line for a plain markdown table.
///
/// Blank-line separated blocks are joined with `<br>`; single newlines
/// become spaces.
#[must_use]
pub(crate) fn collapse_cell(text: &str) -> String {
    text.split("\n\n")
        .map(|part| {
            part.split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Compute a relative path from one page file to another (RFC 3986).
///
/// The last segment of `from` is the current document; the base directory
/// is everything before it.
#[must_use]
pub(crate) fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let from_dir = if from.ends_with('/') || from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let remaining = &to_segs[common..];

    let result = format!("{}{}", "../".repeat(ups), remaining.join("/"));
    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}
