//! Presentation seam: diff views, editors, cursor placement, notifications.
//!
//! The engine talks to a [`Presenter`]; [`command::CommandPresenter`] drives
//! an editor CLI and records every call so callers can report what happened.

pub mod command;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::BridgeResult;
use crate::locate::Reveal;

/// Editor the presenter opened (for diffs: the right-hand, local side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorHandle {
    pub path: PathBuf,
}

/// One call made on a presenter, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum PresenterCall {
    ShowDiff {
        left: PathBuf,
        right: PathBuf,
        title: String,
    },
    OpenEditor {
        path: PathBuf,
    },
    RevealPosition {
        path: PathBuf,
        reveal: Reveal,
    },
    ShowWarning {
        message: String,
    },
    ShowError {
        message: String,
    },
}

pub trait Presenter {
    /// Show `left` against `right`; returns the handle of the right side.
    fn show_diff(&mut self, left: &Path, right: &Path, title: &str) -> BridgeResult<EditorHandle>;

    fn open_editor(&mut self, path: &Path) -> BridgeResult<EditorHandle>;

    fn reveal_position(&mut self, editor: &EditorHandle, reveal: Reveal) -> BridgeResult<()>;

    fn show_warning(&mut self, message: &str);

    fn show_error(&mut self, message: &str);
}
