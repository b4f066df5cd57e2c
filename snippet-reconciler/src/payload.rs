//! Inbound snippet payload as produced by the report page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::model::BridgeConfig;
use crate::snippet::normalize::normalize_code;

/// One user action's worth of data from the report page.
///
/// `current_code` / `recommended_code` are normalized (numbering stripped);
/// the `raw_*` twins keep the `N.` prefixes and ellipsis markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnippetPayload {
    pub class_name: String,
    pub method_name: String,
    pub file_path: String,
    #[serde(alias = "classesPath")]
    pub base_path: String,
    pub source_dir: String,
    pub current_code: String,
    pub recommended_code: String,
    pub raw_current_code: String,
    pub raw_recommended_code: String,
    pub page_url: String,
}

impl SnippetPayload {
    /// Build from query-style key/value pairs. Unknown keys are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |k: &str| params.get(k).cloned().unwrap_or_default();
        let base_path = match params.get("basePath") {
            Some(v) if !v.is_empty() => v.clone(),
            _ => get("classesPath"),
        };
        Self {
            class_name: get("className"),
            method_name: get("methodName"),
            file_path: get("filePath"),
            base_path,
            source_dir: get("sourceDir"),
            current_code: get("currentCode"),
            recommended_code: get("recommendedCode"),
            raw_current_code: get("rawCurrentCode"),
            raw_recommended_code: get("rawRecommendedCode"),
            page_url: get("pageUrl"),
        }
    }

    /// Fill request-independent defaults from config.
    ///
    /// - empty `source_dir` → configured default
    /// - empty `base_path` → configured base path
    /// - optionally derive normalized snippets from raw ones
    pub fn with_defaults(mut self, cfg: &BridgeConfig) -> Self {
        if self.source_dir.trim().is_empty() {
            self.source_dir = cfg.default_source_dir.clone();
        }
        if self.base_path.trim().is_empty() {
            self.base_path = cfg.base_path.clone();
        }
        if cfg.derive_normalized {
            if is_present(&self.raw_current_code) && !is_present(&self.current_code) {
                self.current_code = normalize_code(&self.raw_current_code);
            }
            if is_present(&self.raw_recommended_code) && !is_present(&self.recommended_code) {
                self.recommended_code = normalize_code(&self.raw_recommended_code);
            }
        }
        self
    }

    /// Human title base: `<prefix>: Class.method`, `<prefix>: Class` or `<prefix>`.
    pub fn title_base(&self, prefix: &str) -> String {
        let (class, method) = (self.class_name.trim(), self.method_name.trim());
        match (class.is_empty(), method.is_empty()) {
            (true, _) => prefix.to_string(),
            (false, true) => format!("{prefix}: {class}"),
            (false, false) => format!("{prefix}: {class}.{method}"),
        }
    }

    pub fn has_current(&self) -> bool {
        is_present(&self.current_code)
    }

    pub fn has_recommended(&self) -> bool {
        is_present(&self.recommended_code)
    }

    pub fn has_raw_current(&self) -> bool {
        is_present(&self.raw_current_code)
    }

    pub fn has_raw_recommended(&self) -> bool {
        is_present(&self.raw_recommended_code)
    }
}

/// Non-blank check shared by all "is this input usable" guards.
pub(crate) fn is_present(s: &str) -> bool {
    !s.trim().is_empty()
}
