use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;

use crate::core::{
    app_state::{AppState, LastPayload},
    http::response_envelope::ApiResponse,
};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LastPayloadResponse {
    Payload(LastPayload),
    Empty { message: &'static str },
}

pub const NO_PAYLOAD_YET: &str = "no payload received yet";

/// `GET /last-payload`
pub async fn last_payload_route(
    State(state): State<Arc<AppState>>,
) -> ApiResponse<LastPayloadResponse> {
    let body = match state.last_payload() {
        Some(last) => LastPayloadResponse::Payload(last),
        None => LastPayloadResponse::Empty {
            message: NO_PAYLOAD_YET,
        },
    };
    ApiResponse::success(body)
}

/// `GET /health`
pub async fn health_route() -> &'static str {
    "ok"
}
