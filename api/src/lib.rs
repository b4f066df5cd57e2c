//! HTTP surface of the bridge.
//!
//! - `GET /open-diff`, `GET /open-file`: payload as query parameters
//! - `GET /last-payload`: last received payload
//! - `GET /health`
//!
//! Any other path is answered with an `UNKNOWN_PATH` warning.

pub mod core;
pub mod error_handler;
pub mod routes;

use std::sync::Arc;

use snippet_reconciler::{CommandPresenter, present::Presenter, request::BridgeRequest};
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::bridge::bridge_response::BridgeResponse,
};

/// Serve until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let state = Arc::new(AppState::from_env()?);
    let address = state.address.clone();
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| error_handler::AppError::Bind {
            address: address.clone(),
            source,
        })?;
    info!(%address, "bridge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(error_handler::AppError::Server)?;

    info!("bridge stopped");
    Ok(())
}

/// Handle a single bridge URI (`<scheme>://<authority>/open-diff?...`)
/// without starting the server.
pub fn run_uri(uri: &str) -> AppResult<BridgeResponse> {
    let state = AppState::from_env()?;
    let mut presenter = CommandPresenter::new(&state.bridge.config().present);
    let req = match BridgeRequest::from_uri(uri) {
        Ok(req) => req,
        Err(err) => {
            presenter.show_warning(&err.to_string());
            return Err(err.into());
        }
    };
    let outcome = state.bridge.handle(&req, &mut presenter)?;
    Ok(BridgeResponse {
        outcome,
        calls: presenter.into_calls(),
    })
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
