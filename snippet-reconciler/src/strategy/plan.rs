//! Turn a [`Strategy`] into a concrete [`DiffPlan`] (artifacts on disk) and
//! hand it to a [`Presenter`].

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use super::select::{LocalFile, Strategy};
use crate::artifacts::{CURRENT_PREFIX, MERGED_PREFIX, RECOMMENDED_PREFIX, write_artifact};
use crate::config::model::BridgeConfig;
use crate::errors::{BridgeError, BridgeResult};
use crate::locate::{IdentifierLocator, reveal_for};
use crate::payload::SnippetPayload;
use crate::present::{EditorHandle, Presenter};
use crate::resolve::fs::FileSystem;

pub const WARN_NO_RECOMMENDATION: &str = "no recommendation snippet found, opened local file only";
pub const WARN_NO_LOCAL_FILE: &str = "local file not found, opened recommendation only";

/// What will be shown. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum DiffPlan {
    MergedPatch {
        patched_path: PathBuf,
        local_path: PathBuf,
        title: String,
    },
    SnippetDelta {
        before_path: PathBuf,
        after_path: PathBuf,
        title: String,
    },
    RecommendationVsLocal {
        recommended_path: PathBuf,
        local_path: PathBuf,
        title: String,
        reveal_method: Option<String>,
    },
    OpenLocalOnly {
        local_path: PathBuf,
        reveal_method: Option<String>,
        warning: String,
    },
    OpenRecommendedOnly {
        recommended_path: PathBuf,
        warning: String,
    },
    Unresolvable {
        error_message: String,
    },
}

/// Write the artifacts a strategy needs and build its plan.
pub fn build_plan<F: FileSystem>(
    strategy: Strategy,
    payload: &SnippetPayload,
    local: Option<&LocalFile>,
    fs: &F,
    cfg: &BridgeConfig,
) -> BridgeResult<DiffPlan> {
    let title_base = payload.title_base(&cfg.present.title_prefix);
    let reveal_method = non_empty(&payload.method_name);
    let write = |prefix: &str, content: &str| {
        write_artifact(
            fs,
            &cfg.present.tmp_dir,
            prefix,
            &payload.class_name,
            &cfg.file_extension,
            content,
        )
    };
    let local_path = || -> BridgeResult<PathBuf> {
        local
            .map(|l| l.path.clone())
            .ok_or_else(|| BridgeError::FileNotFound(display_class(payload)))
    };

    let plan = match strategy {
        Strategy::MergedPatch { patched } => DiffPlan::MergedPatch {
            patched_path: write(MERGED_PREFIX, &patched)?,
            local_path: local_path()?,
            title: format!("{title_base} (Recommendation Applied -> Local)"),
        },
        Strategy::SnippetDelta => DiffPlan::SnippetDelta {
            before_path: write(CURRENT_PREFIX, &payload.current_code)?,
            after_path: write(RECOMMENDED_PREFIX, &payload.recommended_code)?,
            title: format!("{title_base} (Snippet Delta)"),
        },
        Strategy::RecommendationVsLocal => DiffPlan::RecommendationVsLocal {
            recommended_path: write(RECOMMENDED_PREFIX, &payload.recommended_code)?,
            local_path: local_path()?,
            title: format!("{title_base} (Recommended -> Local)"),
            reveal_method,
        },
        Strategy::OpenLocalOnly => DiffPlan::OpenLocalOnly {
            local_path: local_path()?,
            reveal_method,
            warning: WARN_NO_RECOMMENDATION.to_string(),
        },
        Strategy::OpenRecommendedOnly => DiffPlan::OpenRecommendedOnly {
            recommended_path: write(RECOMMENDED_PREFIX, &payload.recommended_code)?,
            warning: WARN_NO_LOCAL_FILE.to_string(),
        },
        Strategy::Unresolvable => DiffPlan::Unresolvable {
            error_message: BridgeError::NoUsableInput.to_string(),
        },
    };

    debug!(?plan, "plan: built");
    Ok(plan)
}

/// Issue the presenter calls for `plan`.
///
/// `local_text` is the local file content used for the method reveal; reveal
/// misses and reveal failures never fail the request.
pub fn present_plan<P: Presenter, L: IdentifierLocator>(
    plan: &DiffPlan,
    local_text: Option<&str>,
    presenter: &mut P,
    locator: &L,
) -> BridgeResult<()> {
    match plan {
        DiffPlan::MergedPatch {
            patched_path,
            local_path,
            title,
        } => {
            presenter.show_diff(patched_path, local_path, title)?;
        }
        DiffPlan::SnippetDelta {
            before_path,
            after_path,
            title,
        } => {
            presenter.show_diff(before_path, after_path, title)?;
        }
        DiffPlan::RecommendationVsLocal {
            recommended_path,
            local_path,
            title,
            reveal_method,
        } => {
            let editor = presenter.show_diff(recommended_path, local_path, title)?;
            try_reveal(presenter, locator, &editor, local_text, reveal_method.as_deref());
        }
        DiffPlan::OpenLocalOnly {
            local_path,
            reveal_method,
            warning,
        } => {
            let editor = presenter.open_editor(local_path)?;
            try_reveal(presenter, locator, &editor, local_text, reveal_method.as_deref());
            presenter.show_warning(warning);
        }
        DiffPlan::OpenRecommendedOnly {
            recommended_path,
            warning,
        } => {
            presenter.open_editor(recommended_path)?;
            presenter.show_warning(warning);
        }
        DiffPlan::Unresolvable { error_message } => {
            presenter.show_error(error_message);
        }
    }
    Ok(())
}

/// Best-effort cursor placement on `method` inside `text`.
pub fn try_reveal<P: Presenter, L: IdentifierLocator>(
    presenter: &mut P,
    locator: &L,
    editor: &EditorHandle,
    text: Option<&str>,
    method: Option<&str>,
) {
    let (Some(text), Some(method)) = (text, method) else {
        return;
    };
    let Some(reveal) = reveal_for(locator, text, method) else {
        debug!(%method, path = %editor.path.display(), "reveal: method not found");
        return;
    };
    if let Err(err) = presenter.reveal_position(editor, reveal) {
        warn!(%method, %err, "reveal: presenter failed, ignored");
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn display_class(payload: &SnippetPayload) -> String {
    non_empty(&payload.class_name).unwrap_or_else(|| "class".to_string())
}
