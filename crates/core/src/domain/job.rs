// Job Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};

/// Job ID (UUID v4 in production), exposed to clients as `prompt_id`
pub type JobId = String;

/// Queue position assigned at submission (starts at 1, never reused)
pub type SequenceNumber = u64;

/// Job Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Job Payload (the caller's prompt document, opaque to the queue)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPayload(serde_json::Value);

impl JobPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Job Entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub sequence: SequenceNumber,
    pub client_id: String,
    pub payload: JobPayload,
    pub status: JobStatus,

    /// Output document; `Some` exactly when the job is completed
    outputs: Option<serde_json::Value>,

    pub submitted_at: i64, // epoch ms
    pub started_at: Option<i64>,
    pub finished_at: Option<i64>,
}

impl Job {
    /// Create a new pending job
    ///
    /// # Arguments
    ///
    /// * `id` - Unique job ID (injected, not generated)
    /// * `sequence` - Queue position assigned by the manager
    /// * `client_id` - Caller token, passed through unchanged
    /// * `payload` - Prompt document
    /// * `submitted_at` - Submission timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: impl Into<String>,
        sequence: SequenceNumber,
        client_id: impl Into<String>,
        payload: JobPayload,
        submitted_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            sequence,
            client_id: client_id.into(),
            payload,
            status: JobStatus::Pending,
            outputs: None,
            submitted_at,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn outputs(&self) -> Option<&serde_json::Value> {
        self.outputs.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.status == JobStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }

    /// Transition to Processing state with explicit timestamp
    pub fn start(&mut self, now_millis: i64) -> Result<()> {
        if self.status != JobStatus::Pending {
            return Err(DomainError::InvalidStateTransition {
                from: self.status.to_string(),
                to: JobStatus::Processing.to_string(),
            });
        }
        self.status = JobStatus::Processing;
        self.started_at = Some(now_millis);
        Ok(())
    }

    /// Transition to Completed state, storing the output document
    pub fn complete(&mut self, outputs: serde_json::Value, now_millis: i64) -> Result<()> {
        if self.status != JobStatus::Processing {
            return Err(DomainError::InvalidStateTransition {
                from: self.status.to_string(),
                to: JobStatus::Completed.to_string(),
            });
        }
        self.status = JobStatus::Completed;
        self.outputs = Some(outputs);
        self.finished_at = Some(now_millis);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pending_job() -> Job {
        Job::new("job-1", 1, "c1", JobPayload::new(json!({"a": 1})), 1000)
    }

    #[test]
    fn test_new_job_is_pending_without_outputs() {
        let job = pending_job();

        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.outputs().is_none());
        assert!(job.started_at.is_none());
    }

    #[test]
    fn test_full_lifecycle() {
        let mut job = pending_job();

        job.start(2000).unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.outputs().is_none());

        job.complete(json!({"9": {}}), 3000).unwrap();
        assert!(job.is_completed());
        assert_eq!(job.outputs(), Some(&json!({"9": {}})));
        assert_eq!(job.started_at, Some(2000));
        assert_eq!(job.finished_at, Some(3000));
    }

    #[test]
    fn test_complete_requires_processing() {
        let mut job = pending_job();

        let err = job.complete(json!({}), 2000).unwrap_err();

        assert!(err.to_string().contains("pending -> completed"));
        assert!(job.outputs().is_none());
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut job = pending_job();
        job.start(2000).unwrap();

        assert!(job.start(2500).is_err());
        assert_eq!(job.started_at, Some(2000));
    }

    #[test]
    fn test_payload_serializes_transparently() {
        let payload = JobPayload::new(json!({"3": {"inputs": {"seed": 42}}}));

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value, json!({"3": {"inputs": {"seed": 42}}}));
    }
}
