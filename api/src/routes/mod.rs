pub mod bridge;
pub mod inspect_route;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::core::app_state::AppState;
use bridge::bridge_route::{open_diff_route, open_file_route, unknown_path_route};
use inspect_route::{health_route, last_payload_route};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/open-diff", get(open_diff_route))
        .route("/open-file", get(open_file_route))
        .route("/last-payload", get(last_payload_route))
        .route("/health", get(health_route))
        .fallback(unknown_path_route)
        .with_state(state)
}
