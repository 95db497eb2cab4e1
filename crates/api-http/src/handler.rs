//! HTTP Route Handlers

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use promptmock_core::application::JobQueueManager;
use promptmock_core::domain::{JobPayload, QueueSnapshot};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::types::{HistoryResponse, PromptRequest, PromptResponse};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<JobQueueManager>,
}

impl AppState {
    pub fn new(manager: Arc<JobQueueManager>) -> Self {
        Self { manager }
    }
}

/// POST /prompt
///
/// The body is decoded as JSON whatever the `Content-Type` header says;
/// clients commonly post JSON with a form content type.
pub async fn submit_prompt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PromptResponse>, ApiError> {
    let mut req: PromptRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Rejected malformed prompt submission");
        ApiError::BadRequest(e.to_string())
    })?;

    let payload = JobPayload::new(req.prompt_value());
    let prompt_id = state.manager.submit(req.client_id, payload).await;

    Ok(Json(PromptResponse { prompt_id }))
}

/// GET /history/{prompt_id}
pub async fn get_history(
    State(state): State<AppState>,
    Path(prompt_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let mut response = HistoryResponse::new();
    match state.manager.history(&prompt_id).await? {
        Some(entry) => {
            response.insert(prompt_id, entry);
        }
        None => debug!(prompt_id = %prompt_id, "History requested before completion"),
    }
    Ok(Json(response))
}

/// GET /queue
pub async fn get_queue(State(state): State<AppState>) -> Json<QueueSnapshot> {
    Json(state.manager.queue_snapshot().await)
}
