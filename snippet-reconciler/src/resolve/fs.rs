//! File-system seam used by the resolver and the artifact writer.
//!
//! [`LocalFs`] is the real implementation; tests use it over `tempfile`
//! directories, so there is no mock layer.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Minimal set of file operations the engine needs.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// File content; invalid UTF-8 is replaced, never an error.
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Create a **new** file at `path` (or a suffixed sibling if `path` is
    /// taken) and return where the content actually landed.
    fn write_text(&self, path: &Path, content: &str) -> io::Result<PathBuf>;

    /// Files under `roots` matching `pattern` (root-relative, `/`-separated),
    /// skipping anything inside `excluded_dirs`. Stops after `max_results`.
    fn list_files(
        &self,
        roots: &[PathBuf],
        pattern: &str,
        excluded_dirs: &[String],
        max_results: usize,
    ) -> Vec<PathBuf>;
}

/// How many suffixed names to try before giving up on a clash.
const MAX_NAME_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<PathBuf> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = if attempt == 0 {
                path.to_path_buf()
            } else {
                suffixed(path, attempt)
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(mut f) => {
                    f.write_all(content.as_bytes())?;
                    return Ok(candidate);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(path = %candidate.display(), "fs: name taken, retry");
                }
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free file name near {}", path.display()),
        ))
    }

    fn list_files(
        &self,
        roots: &[PathBuf],
        pattern: &str,
        excluded_dirs: &[String],
        max_results: usize,
    ) -> Vec<PathBuf> {
        let include = match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(g) => g.compile_matcher(),
            Err(err) => {
                warn!("fs: invalid search pattern {pattern:?}: {err}");
                return Vec::new();
            }
        };
        let exclude = build_exclude_globset(excluded_dirs);

        let mut out = Vec::new();
        for root in roots {
            if !root.is_dir() {
                debug!(root = %root.display(), "fs: skip missing root");
                continue;
            }
            let walker = WalkDir::new(root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| keep_entry(e, excluded_dirs));

            for entry in walker.filter_map(Result::ok) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let rel = to_unix_sep(
                    entry
                        .path()
                        .strip_prefix(root)
                        .unwrap_or(entry.path())
                        .to_string_lossy(),
                );
                if exclude.as_ref().is_some_and(|gs| gs.is_match(&rel)) {
                    continue;
                }
                if include.is_match(&rel) {
                    out.push(entry.into_path());
                    if out.len() >= max_results {
                        debug!(max_results, "fs: search cap reached");
                        return out;
                    }
                }
            }
        }
        out
    }
}

/// `Foo.cls` → `Foo-1.cls`.
fn suffixed(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{n}"),
    };
    path.with_file_name(name)
}

/// Prune excluded directories before descending into them.
fn keep_entry(entry: &DirEntry, excluded_dirs: &[String]) -> bool {
    if entry.depth() > 0 && entry.file_type().is_dir() {
        if let Some(name) = entry.file_name().to_str() {
            return !excluded_dirs.iter().any(|d| d == name);
        }
    }
    true
}

/// `**/{.git,node_modules,...}/**`; `None` when nothing is excluded.
fn build_exclude_globset(excluded_dirs: &[String]) -> Option<GlobSet> {
    let names: Vec<String> = excluded_dirs
        .iter()
        .map(|d| escape_glob(d.trim()))
        .filter(|d| !d.is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for name in names {
        if let Ok(g) = Glob::new(&format!("**/{name}/**")) {
            builder.add(g);
        }
    }
    builder.build().ok()
}

/// Quote glob metacharacters so `s` matches itself literally.
pub fn escape_glob(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' | '?' | '[' | ']' | '{' | '}' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Replace OS-specific separators with `/`.
pub fn to_unix_sep<S: AsRef<str>>(s: S) -> String {
    s.as_ref().replace('\\', "/")
}
