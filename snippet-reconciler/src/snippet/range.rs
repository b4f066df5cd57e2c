//! Line range recovery for numbered snippets.
//!
//! A report snippet is usually a *window* around the change: a block of
//! consecutive numbered lines, sometimes with extra context separated by an
//! ellipsis. We pick the longest run of consecutive numbers as the edit target.

use serde::{Deserialize, Serialize};

use super::LINE_NUMBER_PREFIX;

/// Inclusive 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Lines spanned (1-based inclusive).
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Every `N.` line number present in `raw`, in text order.
pub fn line_numbers(raw: &str) -> Vec<usize> {
    raw.lines()
        .filter_map(|l| LINE_NUMBER_PREFIX.captures(l))
        .filter_map(|c| c.get(1)?.as_str().parse::<usize>().ok())
        .collect()
}

/// Recover the contiguous source range a raw snippet was taken from.
///
/// Numbers are deduplicated and sorted, then split into maximal runs of
/// consecutive integers. The widest run wins; on a tie the earliest run is
/// kept. Returns `None` when no line carries a number.
pub fn recover_line_range(raw: &str) -> Option<LineRange> {
    let mut nums = line_numbers(raw);
    if nums.is_empty() {
        return None;
    }
    nums.sort_unstable();
    nums.dedup();

    let mut best = LineRange::new(nums[0], nums[0]);
    let mut run = best;
    for &n in &nums[1..] {
        if n == run.end + 1 {
            run.end = n;
            continue;
        }
        if run.width() > best.width() {
            best = run;
        }
        run = LineRange::new(n, n);
    }
    if run.width() > best.width() {
        best = run;
    }

    Some(best)
}
