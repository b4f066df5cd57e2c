//! Pure diff-strategy selection.
//!
//! Guards are evaluated top to bottom and the first satisfied one wins; no
//! branch falls through. Nothing here touches the disk.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::PatchError;
use crate::payload::SnippetPayload;
use crate::snippet::patch::try_synthesize;

/// Local file content as read for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub text: String,
}

/// Which comparison to present, strongest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Recommendation spliced into the local file; carries the patched text.
    MergedPatch { patched: String },
    SnippetDelta,
    RecommendationVsLocal,
    OpenLocalOnly,
    OpenRecommendedOnly,
    Unresolvable,
}

/// Selected strategy plus the reason the merged patch was skipped, if tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub strategy: Strategy,
    pub patch_error: Option<PatchError>,
}

/// Decide what to show for `payload` given the (optional) local file.
pub fn select_strategy(payload: &SnippetPayload, local: Option<&LocalFile>) -> Selection {
    let mut patch_error = None;

    // 1) merged patch: local file + both raw snippets + successful splice
    if let Some(local) = local {
        if payload.has_raw_current() && payload.has_raw_recommended() {
            match try_synthesize(
                &local.text,
                &payload.raw_current_code,
                &payload.raw_recommended_code,
            ) {
                Ok(patched) => {
                    debug!(path = %local.path.display(), "strategy: merged patch");
                    return Selection {
                        strategy: Strategy::MergedPatch { patched },
                        patch_error: None,
                    };
                }
                Err(err) => {
                    warn!(path = %local.path.display(), %err, "strategy: merged patch skipped");
                    patch_error = Some(err);
                }
            }
        }
    }

    let strategy = if payload.has_current() && payload.has_recommended() {
        // 2) snippet-vs-snippet, with or without a local file
        Strategy::SnippetDelta
    } else if local.is_some() && payload.has_recommended() {
        // 3) whole recommendation vs whole local file
        Strategy::RecommendationVsLocal
    } else if local.is_some() {
        // 4) nothing to compare, just open the file
        Strategy::OpenLocalOnly
    } else if payload.has_recommended() {
        // 5) no local file, show what we have
        Strategy::OpenRecommendedOnly
    } else {
        Strategy::Unresolvable
    };
    debug!(?strategy, "strategy: selected");

    Selection {
        strategy,
        patch_error,
    }
}
