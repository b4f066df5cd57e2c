//! Splice a recommended snippet into the full local file text.
//!
//! Pure text transformation: the local file is never touched, the caller
//! decides what to do with the patched candidate.

use tracing::debug;

use super::normalize::normalize_snippet;
use super::range::{LineRange, recover_line_range};
use crate::errors::PatchError;

/// Like [`try_synthesize`] but discards the failure reason.
pub fn synthesize(local: &str, raw_current: &str, raw_recommended: &str) -> Option<String> {
    try_synthesize(local, raw_current, raw_recommended).ok()
}

/// Build the patched local file text.
///
/// 1) Recover the edited range from the raw *current* snippet;
/// 2) Check the range lies inside the local file (guards stale files);
/// 3) Normalize the raw *recommended* snippet into replacement lines;
/// 4) Replace `[start, end]` and reassemble with `\n`, keeping the original
///    trailing-newline convention.
pub fn try_synthesize(
    local: &str,
    raw_current: &str,
    raw_recommended: &str,
) -> Result<String, PatchError> {
    let range = recover_line_range(raw_current).ok_or(PatchError::NoLineRangeFound)?;

    let lines: Vec<&str> = local.lines().collect();
    check_bounds(range, lines.len())?;

    let replacement = normalize_snippet(raw_recommended);
    if replacement.is_empty() {
        return Err(PatchError::EmptyReplacement);
    }

    debug!(
        start = range.start,
        end = range.end,
        replaced = range.line_count(),
        inserted = replacement.len(),
        "patch: splice"
    );

    let start_idx = range.start - 1;
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() - range.line_count() + replacement.len());
    out.extend_from_slice(&lines[..start_idx]);
    out.extend(replacement.iter().map(String::as_str));
    out.extend_from_slice(&lines[range.end..]);

    let mut text = out.join("\n");
    if local.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

fn check_bounds(range: LineRange, total: usize) -> Result<(), PatchError> {
    if range.start == 0 || range.end < range.start || range.end > total {
        return Err(PatchError::RangeOutOfBounds {
            start: range.start,
            end: range.end,
            total,
        });
    }
    Ok(())
}
