//! Presenter backed by an editor command line (`code`, `codium`, ...).
//!
//! - diff:   `<cmd> --diff <left> <right>`
//! - open:   `<cmd> <path>`
//! - reveal: `<cmd> --goto <path>:<line>:<col>`
//!
//! Warnings and errors go to the log. Dry-run records and logs the calls
//! without spawning anything.

use std::{
    ffi::OsString,
    path::Path,
    process::Command,
};

use tracing::{debug, error, info, warn};

use super::{EditorHandle, Presenter, PresenterCall};
use crate::config::model::PresentConfig;
use crate::errors::{BridgeError, BridgeResult};
use crate::locate::Reveal;

#[derive(Debug, Clone)]
pub struct CommandPresenter {
    program: String,
    base_args: Vec<String>,
    dry_run: bool,
    title_prefix: String,
    calls: Vec<PresenterCall>,
}

impl CommandPresenter {
    pub fn new(cfg: &PresentConfig) -> Self {
        let mut parts = cfg.editor_command.split_whitespace().map(String::from);
        let program = parts.next().unwrap_or_else(|| "code".to_string());
        Self {
            program,
            base_args: parts.collect(),
            dry_run: cfg.dry_run,
            title_prefix: cfg.title_prefix.clone(),
            calls: Vec::new(),
        }
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<PresenterCall> {
        self.calls
    }

    fn run(&self, args: Vec<OsString>) -> BridgeResult<()> {
        if self.dry_run {
            debug!(program = %self.program, ?args, "present: dry-run");
            return Ok(());
        }
        let status = Command::new(&self.program)
            .args(&self.base_args)
            .args(&args)
            .status()
            .map_err(|e| BridgeError::Presenter(format!("failed to launch {}: {e}", self.program)))?;
        if !status.success() {
            return Err(BridgeError::Presenter(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

impl Presenter for CommandPresenter {
    fn show_diff(&mut self, left: &Path, right: &Path, title: &str) -> BridgeResult<EditorHandle> {
        info!(left = %left.display(), right = %right.display(), %title, "present: diff");
        self.calls.push(PresenterCall::ShowDiff {
            left: left.to_path_buf(),
            right: right.to_path_buf(),
            title: title.to_string(),
        });
        self.run(vec!["--diff".into(), left.into(), right.into()])?;
        Ok(EditorHandle {
            path: right.to_path_buf(),
        })
    }

    fn open_editor(&mut self, path: &Path) -> BridgeResult<EditorHandle> {
        info!(path = %path.display(), "present: open");
        self.calls.push(PresenterCall::OpenEditor {
            path: path.to_path_buf(),
        });
        self.run(vec![path.into()])?;
        Ok(EditorHandle {
            path: path.to_path_buf(),
        })
    }

    fn reveal_position(&mut self, editor: &EditorHandle, reveal: Reveal) -> BridgeResult<()> {
        debug!(path = %editor.path.display(), line = reveal.line, col = reveal.column, "present: reveal");
        self.calls.push(PresenterCall::RevealPosition {
            path: editor.path.clone(),
            reveal,
        });
        let target = format!("{}:{}:{}", editor.path.display(), reveal.line, reveal.column);
        self.run(vec!["--goto".into(), target.into()])
    }

    fn show_warning(&mut self, message: &str) {
        let message = format!("{} bridge: {message}", self.title_prefix);
        warn!("{message}");
        self.calls.push(PresenterCall::ShowWarning { message });
    }

    fn show_error(&mut self, message: &str) {
        let message = format!("{} bridge: {message}", self.title_prefix);
        error!("{message}");
        self.calls.push(PresenterCall::ShowError { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dry() -> CommandPresenter {
        CommandPresenter::new(&PresentConfig {
            dry_run: true,
            editor_command: "code --reuse-window".into(),
            ..Default::default()
        })
    }

    #[test]
    fn splits_editor_command() {
        let p = dry();
        assert_eq!(p.program, "code");
        assert_eq!(p.base_args, vec!["--reuse-window"]);
    }

    #[test]
    fn records_calls_in_order() {
        let mut p = dry();
        let h = p
            .show_diff(Path::new("/tmp/l.cls"), Path::new("/w/r.cls"), "T")
            .unwrap();
        assert_eq!(h.path, PathBuf::from("/w/r.cls"));
        p.reveal_position(&h, Reveal::at("x\nfoo(", 2)).unwrap();
        p.show_warning("careful");

        let calls = p.into_calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(&calls[0], PresenterCall::ShowDiff { title, .. } if title == "T"));
        assert!(matches!(
            &calls[1],
            PresenterCall::RevealPosition { reveal, .. } if reveal.line == 2 && reveal.column == 1
        ));
        assert!(matches!(
            &calls[2],
            PresenterCall::ShowWarning { message } if message == "Insight bridge: careful"
        ));
    }

    #[test]
    fn missing_program_is_a_presenter_error() {
        let mut p = CommandPresenter::new(&PresentConfig {
            editor_command: "definitely-not-an-editor-binary-xyz".into(),
            ..Default::default()
        });
        let err = p.open_editor(Path::new("/tmp/x.cls")).unwrap_err();
        assert!(matches!(err, BridgeError::Presenter(_)));
    }
}
