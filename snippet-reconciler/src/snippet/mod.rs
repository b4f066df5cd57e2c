//! Snippet reconciliation: map a numbered report snippet back onto a local file.
//!
//! - [`range`]     — recover the contiguous `[start, end]` a snippet covers
//! - [`normalize`] — strip numbering and ellipsis markers
//! - [`patch`]     — splice a recommended snippet into the local file text

pub mod normalize;
pub mod patch;
pub mod range;

use std::sync::LazyLock;

use regex::Regex;

/// `   12. code` → captures `12`; swallows at most one space after the dot.
pub(crate) static LINE_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\.\s?").expect("line number regex"));
