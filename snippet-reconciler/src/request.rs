//! Inbound request: an action selector plus a [`SnippetPayload`].
//!
//! Requests arrive either as HTTP routes (`/open-diff`, `/open-file`) or as a
//! full bridge URI such as
//! `vscode://insight.bridge/open-diff?className=Foo&rawCurrentCode=...`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{BridgeError, BridgeResult};
use crate::payload::SnippetPayload;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    OpenDiff,
    OpenFile,
}

impl Action {
    /// Map a request path to an action.
    pub fn from_path(path: &str) -> BridgeResult<Self> {
        match path.trim_end_matches('/') {
            "/open-diff" => Ok(Action::OpenDiff),
            "/open-file" => Ok(Action::OpenFile),
            other => Err(BridgeError::UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    pub action: Action,
    pub payload: SnippetPayload,
}

impl BridgeRequest {
    pub fn new(action: Action, payload: SnippetPayload) -> Self {
        Self { action, payload }
    }

    /// Parse a full bridge URI (scheme and authority are not checked).
    pub fn from_uri(uri: &str) -> BridgeResult<Self> {
        let url = Url::parse(uri.trim())?;
        let action = Action::from_path(url.path())?;
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        Ok(Self {
            action,
            payload: SnippetPayload::from_params(&params),
        })
    }
}
