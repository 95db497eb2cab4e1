//! HTTP Server
//!
//! Serves the prompt API over TCP with axum.

use crate::handler::{get_history, get_queue, submit_prompt, AppState};
use axum::routing::{get, post};
use axum::Router;
use promptmock_core::application::{JobQueueManager, ShutdownToken};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8288;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Build the API router around a manager
pub fn router(manager: Arc<JobQueueManager>) -> Router {
    Router::new()
        .route("/prompt", post(submit_prompt))
        .route("/history/:prompt_id", get(get_history))
        .route("/queue", get(get_queue))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(manager))
}

/// Handle to a running server
pub struct ServerHandle {
    pub local_addr: SocketAddr,
    pub join: JoinHandle<()>,
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    manager: Arc<JobQueueManager>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, manager: Arc<JobQueueManager>) -> Self {
        Self { config, manager }
    }

    /// Bind the listener and serve until `shutdown` fires
    ///
    /// Port 0 binds an ephemeral port; the actual address is in the handle.
    pub async fn start(self, mut shutdown: ShutdownToken) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind HTTP server on {}: {}", addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read local address: {}", e))?;

        info!(addr = %local_addr, "HTTP server listening");

        let app = router(self.manager);
        let join = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.wait().await })
                .await;
            match served {
                Ok(()) => info!("HTTP server stopped"),
                Err(e) => error!(error = %e, "HTTP server failed"),
            }
        });

        Ok(ServerHandle { local_addr, join })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use promptmock_core::domain::JobPayload;
    use promptmock_core::port::{SequentialIdProvider, SystemTimeProvider};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_manager() -> Arc<JobQueueManager> {
        Arc::new(JobQueueManager::new(
            Arc::new(SequentialIdProvider::new("prompt")),
            Arc::new(SystemTimeProvider),
        ))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_submit_prompt_returns_id() {
        let app = router(test_manager());

        let response = app
            .oneshot(
                Request::post("/prompt")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"client_id":"c1","prompt":{"a":1}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"prompt_id": "prompt-1"}));
    }

    #[tokio::test]
    async fn test_submit_invalid_json_is_bad_request() {
        let app = router(test_manager());

        let response = app
            .oneshot(
                Request::post("/prompt")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_submit_wrong_field_type_is_bad_request() {
        let app = router(test_manager());

        let response = app
            .oneshot(
                Request::post("/prompt")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"client_id":42,"prompt":{}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_form_typed_json_body_is_accepted() {
        let manager = test_manager();
        let app = router(Arc::clone(&manager));

        let response = app
            .oneshot(
                Request::post("/prompt")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(r#"{"client_id":"c1","prompt":{"a":1}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"prompt_id": "prompt-1"}));
        let job = manager.get("prompt-1").await.unwrap();
        assert_eq!(job.payload.as_value(), &json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_submit_without_content_type_is_accepted() {
        let app = router(test_manager());

        let response = app
            .oneshot(
                Request::post("/prompt")
                    .body(Body::from(r#"{"client_id":"c1","prompt":{}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_submit_empty_object_uses_defaults() {
        let manager = test_manager();
        let app = router(Arc::clone(&manager));

        let response = app
            .oneshot(
                Request::post("/prompt")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let job = manager.get("prompt-1").await.unwrap();
        assert_eq!(job.client_id, "");
        assert_eq!(job.payload.as_value(), &Value::Null);
    }

    #[tokio::test]
    async fn test_submit_missing_prompt_queued_as_null() {
        let manager = test_manager();

        let submitted = router(Arc::clone(&manager))
            .oneshot(
                Request::post("/prompt")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"client_id":"c1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(submitted.status(), StatusCode::OK);

        let response = router(manager)
            .oneshot(Request::get("/queue").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({"queue_running": [], "queue_pending": [[1, "prompt-1", null, ["9"]]]})
        );
    }

    #[tokio::test]
    async fn test_submit_non_object_prompt_is_bad_request() {
        for body in [r#"{"prompt":5}"#, r#"{"prompt":[1,2]}"#, r#"{"prompt":"text"}"#] {
            let manager = test_manager();
            let response = router(Arc::clone(&manager))
                .oneshot(
                    Request::post("/prompt")
                        .header("content-type", "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
            assert!(body_json(response).await["error"].is_string());
            assert!(manager.is_empty().await);
        }
    }

    #[tokio::test]
    async fn test_history_unknown_prompt() {
        let app = router(test_manager());

        let response = app
            .oneshot(Request::get("/history/unknown-id").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Prompt not found"}));
    }

    #[tokio::test]
    async fn test_history_pending_prompt_is_empty_object() {
        let manager = test_manager();
        let id = manager.submit("c1", JobPayload::new(json!({"a": 1}))).await;
        let app = router(manager);

        let response = app
            .oneshot(Request::get(format!("/history/{}", id)).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_queue_lists_pending_prompts() {
        let manager = test_manager();
        let id = manager.submit("c1", JobPayload::new(json!({"a": 1}))).await;
        let app = router(manager);

        let response = app
            .oneshot(Request::get("/queue").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"queue_running": [], "queue_pending": [[1, id, {"a": 1}, ["9"]]]})
        );
    }
}
