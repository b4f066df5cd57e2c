use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::Uri,
};
use snippet_reconciler::{
    CommandPresenter, SnippetPayload,
    errors::BridgeError,
    present::Presenter,
    request::{Action, BridgeRequest},
};
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::bridge::bridge_response::BridgeResponse,
};

/// `GET /open-diff?className=..&rawCurrentCode=..`
pub async fn open_diff_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<ApiResponse<BridgeResponse>> {
    run_action(state, Action::OpenDiff, params).await
}

/// `GET /open-file?className=..&methodName=..`
pub async fn open_file_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<ApiResponse<BridgeResponse>> {
    run_action(state, Action::OpenFile, params).await
}

/// Any other path: warn through the presenter and answer 404.
pub async fn unknown_path_route(State(state): State<Arc<AppState>>, uri: Uri) -> AppError {
    let err = BridgeError::UnknownAction(uri.path().to_string());
    let mut presenter = CommandPresenter::new(&state.bridge.config().present);
    presenter.show_warning(&err.to_string());
    err.into()
}

/// Store the payload, then run the blocking engine off the async runtime.
#[instrument(name = "bridge_route", skip(state, params))]
async fn run_action(
    state: Arc<AppState>,
    action: Action,
    params: HashMap<String, String>,
) -> AppResult<ApiResponse<BridgeResponse>> {
    let payload = SnippetPayload::from_params(&params);
    debug!(keys = params.len(), class = %payload.class_name, "payload received");
    state.remember(&payload);

    let response = tokio::task::spawn_blocking(move || -> Result<BridgeResponse, BridgeError> {
        let mut presenter = CommandPresenter::new(&state.bridge.config().present);
        let req = BridgeRequest::new(action, payload);
        let outcome = state.bridge.handle(&req, &mut presenter)?;
        Ok(BridgeResponse {
            outcome,
            calls: presenter.into_calls(),
        })
    })
    .await??;

    info!(calls = response.calls.len(), "bridge request served");
    Ok(ApiResponse::success(response))
}
