//! Configuration loader.
//!
//! Reads `BRIDGE_*` environment variables (the binary loads `.env` first) on
//! top of [`BridgeConfig::default`] and validates the result.

pub mod model;

use std::{env, path::PathBuf};

use tracing::debug;

use crate::errors::ConfigError;
use model::BridgeConfig;

impl BridgeConfig {
    /// Load from ENV, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = BridgeConfig::default();

        if let Some(v) = env_string("BRIDGE_BASE_PATH") {
            cfg.base_path = v;
        }
        if let Some(v) = env_string("BRIDGE_SOURCE_DIR") {
            cfg.default_source_dir = v;
        }
        if let Some(v) = env_string("BRIDGE_FILE_EXT") {
            cfg.file_extension = v.trim_start_matches('.').to_string();
        }
        cfg.derive_normalized = env_bool("BRIDGE_DERIVE_NORMALIZED", cfg.derive_normalized);

        if let Some(v) = env::var_os("BRIDGE_PROJECT_ROOTS") {
            let roots: Vec<PathBuf> = env::split_paths(&v)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !roots.is_empty() {
                cfg.search.project_roots = roots;
            }
        }
        if let Some(v) = env_string("BRIDGE_EXCLUDED_DIRS") {
            cfg.search.excluded_dirs = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        cfg.search.max_results = env_usize("BRIDGE_SEARCH_MAX_RESULTS", cfg.search.max_results);

        if let Some(v) = env_string("BRIDGE_TMP_DIR") {
            cfg.present.tmp_dir = PathBuf::from(v);
        }
        if let Some(v) = env_string("BRIDGE_TITLE_PREFIX") {
            cfg.present.title_prefix = v;
        }
        if let Some(v) = env_string("BRIDGE_EDITOR_CMD") {
            cfg.present.editor_command = v;
        }
        cfg.present.dry_run = env_bool("BRIDGE_DRY_RUN", cfg.present.dry_run);

        cfg.validate()?;
        debug!(
            roots = cfg.search.project_roots.len(),
            ext = %cfg.file_extension,
            dry_run = cfg.present.dry_run,
            "config loaded"
        );
        Ok(cfg)
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
