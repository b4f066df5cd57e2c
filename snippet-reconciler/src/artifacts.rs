//! Request-scoped temp artifacts (patched file, snippet halves).
//!
//! Names are `<prefix>-<SafeClass>-<millis>.<ext>`; the file-system layer
//! adds a numeric suffix on a clash, so concurrent requests never share a file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::errors::BridgeResult;
use crate::resolve::fs::FileSystem;

pub const MERGED_PREFIX: &str = "insight-merged";
pub const CURRENT_PREFIX: &str = "insight-current";
pub const RECOMMENDED_PREFIX: &str = "insight-recommended";

/// Placeholder used when the payload carries no class name.
const DEFAULT_CLASS: &str = "Insight";

/// Keep `[A-Za-z0-9._-]`, replace everything else with `_`.
pub fn safe_class_name(class_name: &str) -> String {
    let class_name = class_name.trim();
    if class_name.is_empty() {
        return DEFAULT_CLASS.to_string();
    }
    class_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Candidate file name for an artifact (before clash handling).
pub fn artifact_file_name(prefix: &str, class_name: &str, ext: &str, millis: i64) -> String {
    format!("{prefix}-{}-{millis}.{ext}", safe_class_name(class_name))
}

/// Write `content` into a fresh artifact under `dir`.
pub fn write_artifact<F: FileSystem>(
    fs: &F,
    dir: &Path,
    prefix: &str,
    class_name: &str,
    ext: &str,
    content: &str,
) -> BridgeResult<PathBuf> {
    let name = artifact_file_name(prefix, class_name, ext, Utc::now().timestamp_millis());
    let path = fs.write_text(&dir.join(name), content)?;
    debug!(path = %path.display(), bytes = content.len(), "artifact written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::fs::LocalFs;

    #[test]
    fn sanitizes_class_names() {
        assert_eq!(safe_class_name("Account Service/v2"), "Account_Service_v2");
        assert_eq!(safe_class_name("my.Class-1_x"), "my.Class-1_x");
        assert_eq!(safe_class_name(""), "Insight");
    }

    #[test]
    fn whitespace_class_name_uses_placeholder() {
        assert_eq!(safe_class_name("   "), "Insight");
        assert_eq!(safe_class_name(" Foo "), "Foo");
        assert_eq!(
            artifact_file_name(CURRENT_PREFIX, " \t", "cls", 1),
            "insight-current-Insight-1.cls"
        );
    }

    #[test]
    fn file_name_layout() {
        assert_eq!(
            artifact_file_name(MERGED_PREFIX, "Foo", "cls", 1700000000000),
            "insight-merged-Foo-1700000000000.cls"
        );
    }

    #[test]
    fn same_request_twice_gets_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_artifact(&LocalFs, dir.path(), CURRENT_PREFIX, "Foo", "cls", "a").unwrap();
        let b = write_artifact(&LocalFs, dir.path(), CURRENT_PREFIX, "Foo", "cls", "b").unwrap();
        assert_ne!(a, b);
        assert_eq!(std::fs::read_to_string(&a).unwrap(), "a");
        assert_eq!(std::fs::read_to_string(&b).unwrap(), "b");
    }
}
