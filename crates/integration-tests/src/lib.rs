//! Shared harness for the HTTP integration tests
//!
//! Wires a manager, a worker with a short fixed delay and a file output
//! producer writing into a temp directory.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use promptmock_api_http::server::router;
use promptmock_core::application::{shutdown_channel, JobQueueManager, ShutdownSender, Worker};
use promptmock_core::port::{FixedDelay, SystemTimeProvider, UuidProvider};
use promptmock_infra_system::FileOutputProducer;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestHarness {
    pub manager: Arc<JobQueueManager>,
    pub output_dir: PathBuf,
    pub shutdown: ShutdownSender,
    _dir: TempDir,
}

impl TestHarness {
    /// Harness whose source asset exists
    pub fn start(delay: Duration) -> Self {
        Self::build(delay, true)
    }

    /// Harness whose source asset is missing, so every artifact copy fails
    pub fn start_without_source(delay: Duration) -> Self {
        Self::build(delay, false)
    }

    fn build(delay: Duration, with_source: bool) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = dir.path().join("image.jpg");
        if with_source {
            std::fs::write(&source, b"fake jpeg").expect("write source asset");
        }
        let output_dir = dir.path().join("outputs");

        let manager = Arc::new(JobQueueManager::new(
            Arc::new(UuidProvider),
            Arc::new(SystemTimeProvider),
        ));
        let worker = Worker::new(
            Arc::clone(&manager),
            Arc::new(FileOutputProducer::new(source, output_dir.clone())),
            Arc::new(FixedDelay(delay)),
        );

        let (shutdown, token) = shutdown_channel();
        tokio::spawn(async move {
            let _ = worker.run(token).await;
        });

        Self {
            manager,
            output_dir,
            shutdown,
            _dir: dir,
        }
    }

    pub fn router(&self) -> Router {
        router(Arc::clone(&self.manager))
    }

    /// Send one request through a fresh router
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.expect("router call");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    pub async fn submit(&self, client_id: &str, prompt: Value) -> String {
        let body = serde_json::json!({ "client_id": client_id, "prompt": prompt });
        let (status, body) = self
            .request(
                Request::post("/prompt")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "submit failed: {}", body);
        body["prompt_id"]
            .as_str()
            .expect("prompt_id string")
            .to_string()
    }

    pub async fn history(&self, prompt_id: &str) -> (StatusCode, Value) {
        self.request(
            Request::get(format!("/history/{}", prompt_id))
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub async fn queue(&self) -> Value {
        let (status, body) = self
            .request(Request::get("/queue").body(Body::empty()).expect("request"))
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// Poll history until the prompt reports completion
    pub async fn wait_for_history(&self, prompt_id: &str, timeout: Duration) -> Value {
        tokio::time::timeout(timeout, async {
            loop {
                let (_, body) = self.history(prompt_id).await;
                if body.get(prompt_id).is_some() {
                    return body;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("prompt did not complete in time")
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.shutdown.shutdown();
    }
}

/// Prompt ids of one queue list (`queue_running` or `queue_pending`)
pub fn queue_ids(queue: &Value, list: &str) -> Vec<String> {
    queue[list]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry[1].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
