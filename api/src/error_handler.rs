use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snippet_reconciler::errors::{BridgeError, ConfigError};
use thiserror::Error;
use tracing::warn;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / server ---
    #[error("failed to bind listener on {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    // --- Request ---
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Bridge(err) => match err {
                BridgeError::FileNotFound(_) | BridgeError::UnknownAction(_) => {
                    StatusCode::NOT_FOUND
                }
                BridgeError::InvalidUri(_) => StatusCode::BAD_REQUEST,
                BridgeError::Patch(_) | BridgeError::NoUsableInput => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                BridgeError::Presenter(_) => StatusCode::BAD_GATEWAY,
                BridgeError::Io(_) | BridgeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Config(_)
            | AppError::Bind { .. }
            | AppError::Server(_)
            | AppError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Join(_) => "JOIN_ERROR",
            AppError::Bridge(err) => match err {
                BridgeError::FileNotFound(_) => "FILE_NOT_FOUND",
                BridgeError::UnknownAction(_) => "UNKNOWN_PATH",
                BridgeError::InvalidUri(_) => "INVALID_URI",
                BridgeError::Patch(_) => "PATCH_FAILED",
                BridgeError::NoUsableInput => "NO_USABLE_INPUT",
                BridgeError::Presenter(_) => "PRESENTER_FAILED",
                BridgeError::Io(_) => "IO_ERROR",
                BridgeError::Config(_) => "CONFIG_ERROR",
            },
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::Bridge(BridgeError::UnknownAction(path)) => vec![ApiErrorDetail {
                path: Some(path.clone()),
                hint: Some("Use /open-diff or /open-file.".into()),
            }],
            AppError::Bridge(BridgeError::FileNotFound(_)) => vec![ApiErrorDetail {
                path: Some("filePath".into()),
                hint: Some("Pass filePath or basePath, or check BRIDGE_PROJECT_ROOTS.".into()),
            }],
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(error = %self, code = self.error_code(), "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
