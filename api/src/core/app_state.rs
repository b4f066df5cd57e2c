use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use snippet_reconciler::{
    Bridge, SnippetPayload, config::model::BridgeConfig, errors::ConfigError,
};

/// Last payload seen by any bridge route, kept for inspection only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPayload {
    pub payload: SnippetPayload,
    pub received_at: DateTime<Utc>,
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Request handler; stateless apart from its config.
    pub bridge: Bridge,
    /// Address the listener binds to, e.g. "127.0.0.1:7878".
    pub address: String,
    last_payload: Mutex<Option<LastPayload>>,
}

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:7878";

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = BridgeConfig::from_env()?;
        let address = std::env::var("API_ADDRESS")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.into());
        Ok(Self::new(cfg, address))
    }

    pub fn new(cfg: BridgeConfig, address: impl Into<String>) -> Self {
        Self {
            bridge: Bridge::new(cfg),
            address: address.into(),
            last_payload: Mutex::new(None),
        }
    }

    /// Overwrite the inspection slot.
    pub fn remember(&self, payload: &SnippetPayload) {
        *self.slot() = Some(LastPayload {
            payload: payload.clone(),
            received_at: Utc::now(),
        });
    }

    pub fn last_payload(&self) -> Option<LastPayload> {
        self.slot().clone()
    }

    // A poisoned slot still holds a complete value.
    fn slot(&self) -> MutexGuard<'_, Option<LastPayload>> {
        self.last_payload
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
