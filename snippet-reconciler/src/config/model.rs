//! Configuration data structures for the bridge.
//!
//! Groups:
//! - [`BridgeConfig`]  — top-level container
//! - [`SearchConfig`]  — where and how to look for files on disk
//! - [`PresentConfig`] — titles, editor command, dry-run
//!
//! All structs are `serde`-friendly so they can be dumped for diagnostics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Directories never descended into during the workspace search.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    ".sfdx",
    ".sf",
    "coverage",
    "dist",
    "build",
];

/// Top-level configuration for the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// User-configured base directory holding class files (may be empty).
    pub base_path: String,
    /// Project-relative directory used when the payload does not name one.
    pub default_source_dir: String,
    /// File extension (without the dot) of resolved source files.
    pub file_extension: String,
    /// Derive normalized snippets from raw ones when the payload lacks them.
    pub derive_normalized: bool,
    /// Workspace search knobs.
    pub search: SearchConfig,
    /// Presentation knobs.
    pub present: PresentConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            default_source_dir: "force-app/main/default/classes".to_string(),
            file_extension: "cls".to_string(),
            derive_normalized: false,
            search: SearchConfig::default(),
            present: PresentConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Validate config sanity (no degenerate values).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_extension.trim().is_empty() {
            return Err(ConfigError::Empty("file_extension"));
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::ZeroLimit("max_results"));
        }
        if self.present.editor_command.trim().is_empty() {
            return Err(ConfigError::Empty("editor_command"));
        }
        Ok(())
    }

    /// First known project root, if any.
    pub fn primary_root(&self) -> Option<&PathBuf> {
        self.search.project_roots.first()
    }
}

/// Where the resolver looks and what it skips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Workspace roots; the first one anchors `sourceDir` lookups.
    pub project_roots: Vec<PathBuf>,
    /// Directory names pruned from the workspace search.
    pub excluded_dirs: Vec<String>,
    /// Upper bound on collected matches before ranking.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            project_roots: std::env::current_dir().into_iter().collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            max_results: 30,
        }
    }
}

/// How plans are shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentConfig {
    /// Prefix of every diff title and user-facing message.
    pub title_prefix: String,
    /// Editor CLI used by the command presenter (`code`, `codium`, ...).
    pub editor_command: String,
    /// Directory for patched/snippet artifacts.
    pub tmp_dir: PathBuf,
    /// If true, log presenter calls without launching anything.
    pub dry_run: bool,
}

impl Default for PresentConfig {
    fn default() -> Self {
        Self {
            title_prefix: "Insight".to_string(),
            editor_command: "code".to_string(),
            tmp_dir: std::env::temp_dir(),
            dry_run: false,
        }
    }
}
