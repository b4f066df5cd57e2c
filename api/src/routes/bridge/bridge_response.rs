use serde::Serialize;
use snippet_reconciler::{Outcome, present::PresenterCall};

/// Body returned by `/open-diff` and `/open-file`.
#[derive(Debug, Serialize)]
pub struct BridgeResponse {
    /// What the engine resolved and planned.
    pub outcome: Outcome,
    /// Presenter calls issued for this request, in order.
    pub calls: Vec<PresenterCall>,
}
