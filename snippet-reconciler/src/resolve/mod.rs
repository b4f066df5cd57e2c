//! Resolve which local file a report identifier refers to.
//!
//! Strategies, in trust order (first existing hit wins):
//! 1) explicit `filePath` from the payload;
//! 2) `<basePath>/<Class>.<ext>` (user-configured directory);
//! 3) `<first project root>/<sourceDir>/<Class>.<ext>` (project convention);
//! 4) workspace search for `<Class>.<ext>`, ranked by [`rank_candidates`].

pub mod fs;

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::model::BridgeConfig;
use fs::{FileSystem, escape_glob};

/// Which strategy produced a [`ResolvedFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Explicit,
    BasePath,
    SourceDir,
    WorkspaceSearch,
}

/// A resolved local file. Never cached: the disk may change between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub exists: bool,
    pub source: ResolutionSource,
}

/// Resolver over any [`FileSystem`].
pub struct FileResolver<'a, F: FileSystem> {
    fs: &'a F,
    cfg: &'a BridgeConfig,
}

impl<'a, F: FileSystem> FileResolver<'a, F> {
    pub fn new(fs: &'a F, cfg: &'a BridgeConfig) -> Self {
        Self { fs, cfg }
    }

    /// Walk the strategy chain; `None` when every strategy misses.
    pub fn resolve(
        &self,
        class_name: &str,
        base_path: &str,
        source_dir: &str,
        explicit_file_path: &str,
    ) -> Option<ResolvedFile> {
        let class_name = class_name.trim();

        if !explicit_file_path.trim().is_empty() {
            let p = PathBuf::from(explicit_file_path.trim());
            if self.fs.exists(&p) {
                return Some(self.hit(p, ResolutionSource::Explicit));
            }
            debug!(path = %p.display(), "resolve: explicit path missing");
        }

        if class_name.is_empty() {
            debug!("resolve: no class name, nothing else to try");
            return None;
        }
        let file_name = format!("{class_name}.{}", self.cfg.file_extension);

        if let Some(p) = base_path_candidate(base_path, &file_name) {
            if self.fs.exists(&p) {
                return Some(self.hit(p, ResolutionSource::BasePath));
            }
            debug!(path = %p.display(), "resolve: base path candidate missing");
        }

        if let Some(root) = self.cfg.primary_root() {
            let p = source_dir_candidate(root, source_dir, &file_name);
            if self.fs.exists(&p) {
                return Some(self.hit(p, ResolutionSource::SourceDir));
            }
            debug!(path = %p.display(), "resolve: source dir candidate missing");
        }

        let pattern = format!("**/{}", escape_glob(&file_name));
        let matches = self.fs.list_files(
            &self.cfg.search.project_roots,
            &pattern,
            &self.cfg.search.excluded_dirs,
            self.cfg.search.max_results,
        );
        debug!(count = matches.len(), %pattern, "resolve: workspace search");

        rank_candidates(matches)
            .into_iter()
            .find(|p| self.fs.exists(p))
            .map(|p| self.hit(p, ResolutionSource::WorkspaceSearch))
    }

    fn hit(&self, path: PathBuf, source: ResolutionSource) -> ResolvedFile {
        debug!(path = %path.display(), ?source, "resolve: hit");
        ResolvedFile {
            path,
            exists: true,
            source,
        }
    }
}

fn base_path_candidate(base_path: &str, file_name: &str) -> Option<PathBuf> {
    let base = base_path.trim().trim_end_matches(['/', '\\']);
    if base.is_empty() {
        return None;
    }
    Some(Path::new(base).join(file_name))
}

fn source_dir_candidate(root: &Path, source_dir: &str, file_name: &str) -> PathBuf {
    let rel = source_dir.trim().trim_matches(['/', '\\']);
    root.join(rel).join(file_name)
}

/// Order search hits: paths with a `classes` directory first, then shortest.
pub fn rank_candidates(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort_by_key(|p| {
        let pref = if has_classes_segment(p) { 0 } else { 1 };
        (pref, p.to_string_lossy().chars().count())
    });
    paths
}

fn has_classes_segment(p: &Path) -> bool {
    p.parent()
        .map(|dir| {
            dir.components()
                .any(|c| matches!(c, Component::Normal(s) if s == "classes"))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::fs::LocalFs;
    use std::fs as stdfs;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let p = root.join(rel);
        stdfs::create_dir_all(p.parent().unwrap()).unwrap();
        stdfs::write(&p, "class X {}").unwrap();
        p
    }

    fn cfg_for(root: &Path) -> BridgeConfig {
        let mut cfg = BridgeConfig::default();
        cfg.search.project_roots = vec![root.to_path_buf()];
        cfg
    }

    const SRC: &str = "force-app/main/default/classes";

    #[test]
    fn explicit_path_beats_search() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let explicit = touch(root, "elsewhere/Foo.cls");
        touch(root, "pkg/classes/Foo.cls");

        let cfg = cfg_for(root);
        let r = FileResolver::new(&LocalFs, &cfg)
            .resolve("Foo", "", SRC, explicit.to_str().unwrap())
            .unwrap();
        assert_eq!(r.path, explicit);
        assert_eq!(r.source, ResolutionSource::Explicit);
        assert!(r.exists);
    }

    #[test]
    fn base_path_with_trailing_separator() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let expected = touch(root, "mine/Foo.cls");
        touch(root, &format!("{SRC}/Foo.cls"));

        let cfg = cfg_for(root);
        let base = format!("{}/", root.join("mine").display());
        let r = FileResolver::new(&LocalFs, &cfg)
            .resolve("Foo", &base, SRC, "/does/not/exist.cls")
            .unwrap();
        assert_eq!(r.path, expected);
        assert_eq!(r.source, ResolutionSource::BasePath);
    }

    #[test]
    fn source_dir_under_first_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let expected = touch(root, &format!("{SRC}/Foo.cls"));
        touch(root, "a/classes/Foo.cls");

        let cfg = cfg_for(root);
        let r = FileResolver::new(&LocalFs, &cfg)
            .resolve("Foo", "", &format!("/{SRC}/"), "")
            .unwrap();
        assert_eq!(r.path, expected);
        assert_eq!(r.source, ResolutionSource::SourceDir);
    }

    #[test]
    fn search_prefers_classes_then_shortest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "x/Foo.cls");
        touch(root, "deep/nested/classes/Foo.cls");
        let short_classes = touch(root, "b/classes/Foo.cls");
        touch(root, "node_modules/classes/Foo.cls");

        let cfg = cfg_for(root);
        let r = FileResolver::new(&LocalFs, &cfg)
            .resolve("Foo", "", "nope", "")
            .unwrap();
        assert_eq!(r.path, short_classes);
        assert_eq!(r.source, ResolutionSource::WorkspaceSearch);
    }

    #[test]
    fn nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_for(dir.path());
        let resolver = FileResolver::new(&LocalFs, &cfg);
        assert!(resolver.resolve("Missing", "", SRC, "").is_none());
        assert!(resolver.resolve("", "", SRC, "").is_none());
    }

    #[test]
    fn ranking_is_stable_for_equal_keys() {
        let ranked = rank_candidates(vec![
            PathBuf::from("/r/zz/A.cls"),
            PathBuf::from("/r/classes/A.cls"),
            PathBuf::from("/r/aa/A.cls"),
        ]);
        assert_eq!(
            ranked,
            vec![
                PathBuf::from("/r/classes/A.cls"),
                PathBuf::from("/r/zz/A.cls"),
                PathBuf::from("/r/aa/A.cls"),
            ]
        );
    }
}
