//! Strip numbering and ellipsis markers from raw snippets.

use std::sync::LazyLock;

use regex::Regex;

use super::LINE_NUMBER_PREFIX;

static ELLIPSIS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\.{3,}|…)\s*$").expect("ellipsis regex"));

/// `true` if the line only marks an omitted region (`...`, `....`, `…`).
pub fn is_ellipsis_line(line: &str) -> bool {
    ELLIPSIS_LINE.is_match(line)
}

/// Remove a leading `N.` prefix (plus at most one space) if present.
pub fn strip_line_number(line: &str) -> &str {
    match LINE_NUMBER_PREFIX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Replacement lines for a raw snippet.
///
/// Ellipsis lines are dropped, numbered lines lose their prefix, everything
/// else is kept verbatim and in order. A final line terminator does not
/// produce a trailing empty line.
pub fn normalize_snippet(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|l| !is_ellipsis_line(l))
        .map(|l| strip_line_number(l).to_string())
        .collect()
}

/// Report-side normalisation: strip prefixes from every line, then trim.
///
/// Ellipsis lines are kept so the text still shows where regions were
/// omitted. Used to derive `currentCode` / `recommendedCode` from raw input.
pub fn normalize_code(raw: &str) -> String {
    raw.lines()
        .map(strip_line_number)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
