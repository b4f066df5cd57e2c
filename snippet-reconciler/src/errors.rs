//! Crate-wide error hierarchy for snippet-reconciler.
//!
//! Two tiers:
//! - [`PatchError`] and the "nothing usable" variants are *recoverable*: the
//!   strategy selector falls back to a weaker plan and at most emits a warning.
//! - Everything else in [`BridgeError`] is a genuine fault (I/O, bad request,
//!   bad config) and surfaces as a user-visible error.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Root error type for the snippet-reconciler crate.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Full-file patch could not be synthesized.
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Resolution exhausted all strategies.
    #[error("could not locate {0} in current workspace")]
    FileNotFound(String),

    /// Neither code nor a file path were present.
    #[error("payload did not include usable code or file path")]
    NoUsableInput,

    /// Inbound request path is not one of the known actions.
    #[error("unknown path {0}")]
    UnknownAction(String),

    /// Inbound bridge URI could not be parsed.
    #[error("invalid bridge uri: {0}")]
    InvalidUri(#[from] url::ParseError),

    /// Configuration problems (zero caps, empty extension, etc.).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Editor / diff tool could not be launched.
    #[error("presenter failed: {0}")]
    Presenter(String),

    /// File-system failure (reading the local file, writing an artifact).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// `true` for taxonomy errors that only ever degrade the plan.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BridgeError::Patch(_) | BridgeError::FileNotFound(_) | BridgeError::NoUsableInput
        )
    }
}

/// Reasons a merged full-file patch was not produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The raw current snippet had no parseable `N.` numbering.
    #[error("no line range found in current snippet")]
    NoLineRangeFound,

    /// Recovered range does not fit the local file (stale or mismatched file).
    #[error("line range {start}-{end} is outside local file with {total} lines")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        total: usize,
    },

    /// Normalized recommendation had zero lines.
    #[error("recommended snippet is empty after normalization")]
    EmptyReplacement,
}

/// Configuration errors detected by `BridgeConfig::validate`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{0}` must be greater than 0")]
    ZeroLimit(&'static str),

    #[error("`{0}` must not be empty")]
    Empty(&'static str),
}
