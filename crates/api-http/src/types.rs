//! HTTP Request/Response Types
//!
//! Field names are fixed by the client protocol.

use std::collections::BTreeMap;

use promptmock_core::domain::HistoryEntry;
use serde::{Deserialize, Serialize};

/// POST /prompt
///
/// `prompt` must be an object or null; absent fields take their zero value.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub prompt: Option<serde_json::Map<String, serde_json::Value>>,
}

impl PromptRequest {
    /// Prompt document as stored on the job (`null` when absent)
    pub fn prompt_value(&mut self) -> serde_json::Value {
        self.prompt
            .take()
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt_id: String,
}

/// GET /history/{prompt_id}: `{}` until the prompt completes, then `{id: entry}`
pub type HistoryResponse = BTreeMap<String, HistoryEntry>;

/// Error body for every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
