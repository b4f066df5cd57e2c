//! Public entry for the snippet-reconciler pipeline.
//!
//! Takes one inbound request (action + [`SnippetPayload`]) and turns it into
//! exactly one presentation outcome.
//!
//! 1) **Step 1 — Resolve**
//!    - Fill payload defaults from config (source dir, base path)
//!    - Find the local file: explicit path → base path → source dir → search
//!
//! 2) **Step 2 — Select**
//!    - Read the local file (if any)
//!    - Try the merged full-file patch, then weaker strategies in order
//!
//! 3) **Step 3 — Plan & present**
//!    - Write request-scoped artifacts
//!    - Show the diff / open the editor, reveal the method, warn or fail
//!
//! Taxonomy errors (no range, stale file, empty replacement, nothing usable)
//! only degrade the plan. I/O and presenter faults become one error call.

pub mod artifacts;
pub mod config;
pub mod errors;
pub mod locate;
pub mod payload;
pub mod present;
pub mod request;
pub mod resolve;
pub mod snippet;
pub mod strategy;

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use config::model::BridgeConfig;
use errors::{BridgeError, BridgeResult};
use locate::{IdentifierLocator, RegexLocator};
use present::Presenter;
use request::{Action, BridgeRequest};
use resolve::fs::{FileSystem, LocalFs};
use resolve::{FileResolver, ResolvedFile};
use strategy::{DiffPlan, LocalFile, build_plan, present_plan, select_strategy};

/// Result of one handled request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub action: Action,
    /// Local file the request resolved to, if any.
    pub resolved: Option<ResolvedFile>,
    /// The diff plan (`OpenDiff` only).
    pub plan: Option<DiffPlan>,
    /// Why a stronger plan was skipped.
    pub notes: Vec<String>,
}

/// Request handler over a file system and an identifier locator.
pub struct Bridge<F: FileSystem = LocalFs, L: IdentifierLocator = RegexLocator> {
    cfg: BridgeConfig,
    fs: F,
    locator: L,
}

impl Bridge {
    pub fn new(cfg: BridgeConfig) -> Self {
        Self::with_parts(cfg, LocalFs, RegexLocator)
    }
}

impl<F: FileSystem, L: IdentifierLocator> Bridge<F, L> {
    pub fn with_parts(cfg: BridgeConfig, fs: F, locator: L) -> Self {
        Self { cfg, fs, locator }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.cfg
    }

    /// Handle one request. On failure the presenter has already received
    /// exactly one error call.
    #[instrument(
        name = "bridge_request",
        skip_all,
        fields(action = ?req.action, class = %req.payload.class_name)
    )]
    pub fn handle<P: Presenter>(
        &self,
        req: &BridgeRequest,
        presenter: &mut P,
    ) -> BridgeResult<Outcome> {
        let t0 = Instant::now();
        let result = match req.action {
            Action::OpenDiff => self.open_diff(req, presenter),
            Action::OpenFile => self.open_file(req, presenter),
        };

        match &result {
            Ok(outcome) => info!(
                plan = outcome.plan.as_ref().map(plan_kind).unwrap_or("open_file"),
                "request done in {} ms",
                t0.elapsed().as_millis()
            ),
            Err(err) => {
                if err.is_recoverable() {
                    presenter.show_error(&format!("{err}."));
                } else {
                    presenter.show_error(&format!("failed: {err}"));
                }
            }
        }
        result
    }

    fn open_diff<P: Presenter>(
        &self,
        req: &BridgeRequest,
        presenter: &mut P,
    ) -> BridgeResult<Outcome> {
        // Step 1: resolve
        let payload = req.payload.clone().with_defaults(&self.cfg);
        let resolved = self.resolve(&payload);
        debug!(found = resolved.is_some(), "step1: resolve done");

        // Step 2: read + select
        let local = match &resolved {
            Some(r) if self.fs.exists(&r.path) => Some(LocalFile {
                path: r.path.clone(),
                text: self.fs.read_text(&r.path)?,
            }),
            _ => None,
        };
        let selection = select_strategy(&payload, local.as_ref());
        let notes: Vec<String> = selection
            .patch_error
            .iter()
            .map(|e| format!("merged patch skipped: {e}"))
            .collect();
        debug!(notes = notes.len(), "step2: strategy selected");

        // Step 3: plan + present
        let plan = build_plan(
            selection.strategy,
            &payload,
            local.as_ref(),
            &self.fs,
            &self.cfg,
        )?;
        present_plan(
            &plan,
            local.as_ref().map(|l| l.text.as_str()),
            presenter,
            &self.locator,
        )?;
        debug!(kind = plan_kind(&plan), "step3: presented");

        Ok(Outcome {
            action: Action::OpenDiff,
            resolved,
            plan: Some(plan),
            notes,
        })
    }

    fn open_file<P: Presenter>(
        &self,
        req: &BridgeRequest,
        presenter: &mut P,
    ) -> BridgeResult<Outcome> {
        let payload = req.payload.clone().with_defaults(&self.cfg);
        let resolved = self.resolve(&payload).ok_or_else(|| {
            let name = if payload.class_name.trim().is_empty() {
                "class".to_string()
            } else {
                payload.class_name.trim().to_string()
            };
            BridgeError::FileNotFound(name)
        })?;

        let editor = presenter.open_editor(&resolved.path)?;
        let text = self.fs.read_text(&resolved.path).ok();
        let method = payload.method_name.trim();
        strategy::plan::try_reveal(
            presenter,
            &self.locator,
            &editor,
            text.as_deref(),
            (!method.is_empty()).then_some(method),
        );

        Ok(Outcome {
            action: Action::OpenFile,
            resolved: Some(resolved),
            plan: None,
            notes: Vec::new(),
        })
    }

    fn resolve(&self, payload: &SnippetPayload) -> Option<ResolvedFile> {
        FileResolver::new(&self.fs, &self.cfg).resolve(
            &payload.class_name,
            &payload.base_path,
            &payload.source_dir,
            &payload.file_path,
        )
    }
}

/// Stable short name of a plan variant for logs.
pub fn plan_kind(plan: &DiffPlan) -> &'static str {
    match plan {
        DiffPlan::MergedPatch { .. } => "merged_patch",
        DiffPlan::SnippetDelta { .. } => "snippet_delta",
        DiffPlan::RecommendationVsLocal { .. } => "recommendation_vs_local",
        DiffPlan::OpenLocalOnly { .. } => "open_local_only",
        DiffPlan::OpenRecommendedOnly { .. } => "open_recommended_only",
        DiffPlan::Unresolvable { .. } => "unresolvable",
    }
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use payload::SnippetPayload;
pub use present::command::CommandPresenter;
pub use snippet::patch::synthesize;
pub use snippet::range::{LineRange, recover_line_range};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::PresenterCall;
    use std::fs;
    use std::path::{Path, PathBuf};

    struct Fixture {
        _dir: tempfile::TempDir,
        root: PathBuf,
        bridge: Bridge,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("project");
        let tmp = dir.path().join("tmp");
        fs::create_dir_all(&root).unwrap();

        let mut cfg = BridgeConfig::default();
        cfg.search.project_roots = vec![root.clone()];
        cfg.present.tmp_dir = tmp;
        cfg.present.dry_run = true;
        Fixture {
            _dir: dir,
            root,
            bridge: Bridge::new(cfg),
        }
    }

    fn write_class(root: &Path, rel: &str, text: &str) -> PathBuf {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, text).unwrap();
        p
    }

    fn class_text() -> String {
        let mut lines: Vec<String> = (1..=14).map(|i| format!("    // line {i}")).collect();
        lines[0] = "public class Foo {".into();
        lines[7] = "    public void run() {".into();
        lines[9] = "foo();".into();
        lines[10] = "bar();".into();
        lines[13] = "}".into();
        lines.join("\n") + "\n"
    }

    fn presenter(f: &Fixture) -> CommandPresenter {
        CommandPresenter::new(&f.bridge.config().present)
    }

    fn diff_request(payload: SnippetPayload) -> BridgeRequest {
        BridgeRequest::new(Action::OpenDiff, payload)
    }

    #[test]
    fn merged_patch_end_to_end() {
        let f = fixture();
        let local = write_class(
            &f.root,
            "force-app/main/default/classes/Foo.cls",
            &class_text(),
        );
        let req = diff_request(SnippetPayload {
            class_name: "Foo".into(),
            method_name: "run".into(),
            current_code: "foo();\nbar();".into(),
            recommended_code: "foo2();\nbar();\nbaz();".into(),
            raw_current_code: "10. foo();\n11. bar();".into(),
            raw_recommended_code: "10. foo2();\n11. bar();\n12. baz();".into(),
            ..Default::default()
        });

        let mut p = presenter(&f);
        let out = f.bridge.handle(&req, &mut p).unwrap();
        let Some(DiffPlan::MergedPatch {
            patched_path,
            local_path,
            title,
        }) = &out.plan
        else {
            panic!("unexpected {:?}", out.plan);
        };
        assert_eq!(local_path, &local);
        assert_eq!(title, "Insight: Foo.run (Recommendation Applied -> Local)");

        let patched = fs::read_to_string(patched_path).unwrap();
        let original = fs::read_to_string(&local).unwrap();
        assert_eq!(patched.lines().count(), original.lines().count() + 1);
        assert_eq!(
            patched.lines().skip(9).take(3).collect::<Vec<_>>(),
            vec!["foo2();", "bar();", "baz();"]
        );
        assert!(patched.ends_with('\n'));
        // local file untouched
        assert_eq!(original, class_text());
        assert!(matches!(p.calls(), [PresenterCall::ShowDiff { .. }]));
    }

    #[test]
    fn no_local_file_with_snippets_is_snippet_delta() {
        let f = fixture();
        let req = diff_request(SnippetPayload {
            class_name: "Ghost".into(),
            current_code: "a();".into(),
            recommended_code: "b();".into(),
            raw_current_code: "3. a();".into(),
            raw_recommended_code: "3. b();".into(),
            ..Default::default()
        });
        let mut p = presenter(&f);
        let out = f.bridge.handle(&req, &mut p).unwrap();
        assert!(out.resolved.is_none());
        assert!(matches!(out.plan, Some(DiffPlan::SnippetDelta { .. })));
        assert!(out.notes.is_empty());
    }

    #[test]
    fn raw_current_only_opens_local_with_warning_and_reveal() {
        let f = fixture();
        write_class(&f.root, "src/classes/Foo.cls", &class_text());
        let req = diff_request(SnippetPayload {
            class_name: "Foo".into(),
            method_name: "run".into(),
            raw_current_code: "10. foo();".into(),
            ..Default::default()
        });
        let mut p = presenter(&f);
        let out = f.bridge.handle(&req, &mut p).unwrap();
        assert!(matches!(out.plan, Some(DiffPlan::OpenLocalOnly { .. })));
        assert_eq!(
            out.resolved.map(|r| r.source),
            Some(resolve::ResolutionSource::WorkspaceSearch)
        );
        let calls = p.into_calls();
        assert!(matches!(calls[0], PresenterCall::OpenEditor { .. }));
        assert!(matches!(
            &calls[1],
            PresenterCall::RevealPosition { reveal, .. } if reveal.line == 8
        ));
        assert!(matches!(calls[2], PresenterCall::ShowWarning { .. }));
    }

    #[test]
    fn recommendation_vs_local_reveals_method_after_diff() {
        let f = fixture();
        let local = write_class(&f.root, "force-app/main/default/classes/Foo.cls", &class_text());
        let req = diff_request(SnippetPayload {
            class_name: "Foo".into(),
            method_name: "run".into(),
            recommended_code: "public void run() { baz(); }".into(),
            ..Default::default()
        });
        let mut p = presenter(&f);
        let out = f.bridge.handle(&req, &mut p).unwrap();
        assert!(matches!(
            out.plan,
            Some(DiffPlan::RecommendationVsLocal { .. })
        ));
        let calls = p.into_calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], PresenterCall::ShowDiff { right, .. } if right == &local));
        assert!(matches!(
            &calls[1],
            PresenterCall::RevealPosition { path, reveal }
                if path == &local && reveal.line == 8 && reveal.column == 17
        ));
    }

    #[test]
    fn non_utf8_local_file_still_diffs() {
        let f = fixture();
        let p_local = f.root.join("force-app/main/default/classes/Foo.cls");
        fs::create_dir_all(p_local.parent().unwrap()).unwrap();
        fs::write(&p_local, b"public class Foo {\n    // caf\xe9\n    void run() {}\n}\n").unwrap();
        let req = diff_request(SnippetPayload {
            class_name: "Foo".into(),
            method_name: "run".into(),
            recommended_code: "void run() { x(); }".into(),
            ..Default::default()
        });
        let mut p = presenter(&f);
        let out = f.bridge.handle(&req, &mut p).unwrap();
        assert!(matches!(
            out.plan,
            Some(DiffPlan::RecommendationVsLocal { ref local_path, .. }) if local_path == &p_local
        ));
        let calls = p.into_calls();
        assert!(matches!(calls[0], PresenterCall::ShowDiff { .. }));
        assert!(matches!(
            &calls[1],
            PresenterCall::RevealPosition { reveal, .. } if reveal.line == 3
        ));
        assert!(!calls.iter().any(|c| matches!(c, PresenterCall::ShowError { .. })));
    }

    #[test]
    fn stale_local_file_notes_fallback() {
        let f = fixture();
        write_class(
            &f.root,
            "force-app/main/default/classes/Foo.cls",
            "class Foo {}\n",
        );
        let req = diff_request(SnippetPayload {
            class_name: "Foo".into(),
            current_code: "foo();".into(),
            recommended_code: "foo2();".into(),
            raw_current_code: "10. foo();".into(),
            raw_recommended_code: "10. foo2();".into(),
            ..Default::default()
        });
        let mut p = presenter(&f);
        let out = f.bridge.handle(&req, &mut p).unwrap();
        assert!(matches!(out.plan, Some(DiffPlan::SnippetDelta { .. })));
        assert_eq!(out.notes.len(), 1);
        assert!(out.notes[0].contains("outside local file"));
    }

    #[test]
    fn empty_payload_is_unresolvable() {
        let f = fixture();
        let mut p = presenter(&f);
        let out = f
            .bridge
            .handle(&diff_request(SnippetPayload::default()), &mut p)
            .unwrap();
        assert_eq!(
            out.plan,
            Some(DiffPlan::Unresolvable {
                error_message: BridgeError::NoUsableInput.to_string()
            })
        );
        assert!(matches!(p.calls(), [PresenterCall::ShowError { .. }]));
    }

    #[test]
    fn open_file_not_found_is_one_error_call() {
        let f = fixture();
        let mut p = presenter(&f);
        let req = BridgeRequest::new(
            Action::OpenFile,
            SnippetPayload {
                class_name: "Nope".into(),
                ..Default::default()
            },
        );
        let err = f.bridge.handle(&req, &mut p).unwrap_err();
        assert!(matches!(err, BridgeError::FileNotFound(ref n) if n == "Nope"));
        assert!(matches!(
            p.calls(),
            [PresenterCall::ShowError { message }]
                if message.ends_with("could not locate Nope in current workspace.")
        ));
    }

    #[test]
    fn open_file_reveals_method() {
        let f = fixture();
        let local = write_class(&f.root, "force-app/main/default/classes/Foo.cls", &class_text());
        let mut p = presenter(&f);
        let req = BridgeRequest::new(
            Action::OpenFile,
            SnippetPayload {
                class_name: "Foo".into(),
                method_name: "run".into(),
                ..Default::default()
            },
        );
        let out = f.bridge.handle(&req, &mut p).unwrap();
        assert_eq!(out.resolved.unwrap().path, local);
        assert!(out.plan.is_none());
        assert_eq!(p.calls().len(), 2);
    }
}
