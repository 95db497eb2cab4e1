// History Record Domain Model
//
// The status block is canned: it mirrors what a real pipeline reports for a
// fully cached run, so clients that parse it keep working.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::job::{Job, JobPayload};

/// Node ids reported by the `execution_cached` message
pub const CACHED_NODE_IDS: [&str; 4] = ["4", "7", "5", "6"];

pub const STATUS_SUCCESS: &str = "success";

/// Lifecycle event, serialized as `[name, data]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionMessage(pub String, pub Value);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionStatus {
    pub status_str: String,
    pub completed: bool,
    pub messages: Vec<ExecutionMessage>,
}

impl ExecutionStatus {
    /// Fixed success block: `execution_start` then `execution_cached`
    pub fn success(prompt_id: &str) -> Self {
        Self {
            status_str: STATUS_SUCCESS.to_string(),
            completed: true,
            messages: vec![
                ExecutionMessage(
                    "execution_start".to_string(),
                    json!({ "prompt_id": prompt_id }),
                ),
                ExecutionMessage(
                    "execution_cached".to_string(),
                    json!({ "nodes": CACHED_NODE_IDS, "prompt_id": prompt_id }),
                ),
            ],
        }
    }
}

/// History record of a completed job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub prompt: JobPayload,
    pub outputs: Value,
    pub status: ExecutionStatus,
}

impl HistoryEntry {
    /// Build the record for a job; `None` until the job is completed
    pub fn for_job(job: &Job) -> Option<Self> {
        let outputs = job.outputs()?;
        Some(Self {
            prompt: job.payload.clone(),
            outputs: outputs.clone(),
            status: ExecutionStatus::success(&job.id),
        })
    }
}
