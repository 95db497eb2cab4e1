// Queue Snapshot Domain Model

use serde::Serialize;

use crate::domain::job::{Job, JobId, JobPayload, SequenceNumber};

/// Output node ids reported for every queue entry
pub const OUTPUT_NODE_IDS: [&str; 1] = ["9"];

/// One queue row, serialized as `[sequence, prompt_id, prompt, ["9"]]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueEntry(
    pub SequenceNumber,
    pub JobId,
    pub JobPayload,
    pub Vec<String>,
);

impl QueueEntry {
    pub fn job_id(&self) -> &str {
        &self.1
    }

    pub fn sequence(&self) -> SequenceNumber {
        self.0
    }
}

impl From<&Job> for QueueEntry {
    fn from(job: &Job) -> Self {
        Self(
            job.sequence,
            job.id.clone(),
            job.payload.clone(),
            OUTPUT_NODE_IDS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

/// Running and pending jobs at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueueSnapshot {
    pub queue_running: Vec<QueueEntry>,
    pub queue_pending: Vec<QueueEntry>,
}
