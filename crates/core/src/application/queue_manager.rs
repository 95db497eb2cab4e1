// Job Queue Manager - owns every job and the single running slot

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use tracing::{debug, info};

use crate::domain::{
    DomainError, HistoryEntry, Job, JobId, JobPayload, QueueEntry, QueueSnapshot, SequenceNumber,
};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, TimeProvider};

/// State guarded by the manager lock
#[derive(Default)]
struct QueueState {
    jobs: HashMap<JobId, Job>,
    running: Option<JobId>,
    last_sequence: SequenceNumber,
}

/// Job Queue Manager
///
/// All reads and writes go through one mutex. The simulated work of a job
/// runs outside of it, so submissions and queries stay responsive while a job
/// is processing.
pub struct JobQueueManager {
    state: Mutex<QueueState>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    work_signal: Notify,
}

impl JobQueueManager {
    pub fn new(id_provider: Arc<dyn IdProvider>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            id_provider,
            time_provider,
            work_signal: Notify::new(),
        }
    }

    /// Store a new pending job and wake the worker. Never blocks on processing.
    pub async fn submit(&self, client_id: impl Into<String>, payload: JobPayload) -> JobId {
        let job_id = self.id_provider.generate_id();
        let now = self.time_provider.now_millis();

        let sequence = {
            let mut state = self.state.lock().await;
            state.last_sequence += 1;
            let sequence = state.last_sequence;
            let job = Job::new(job_id.clone(), sequence, client_id, payload, now);
            state.jobs.insert(job_id.clone(), job);
            sequence
        };

        info!(job_id = %job_id, sequence, "Job submitted");
        self.work_signal.notify_one();
        job_id
    }

    /// History record of a job
    ///
    /// Returns `Ok(None)` while the job is pending or processing, and
    /// `AppError::NotFound` for an unknown id.
    pub async fn history(&self, job_id: &str) -> Result<Option<HistoryEntry>> {
        let state = self.state.lock().await;
        let job = state
            .jobs
            .get(job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;
        Ok(HistoryEntry::for_job(job))
    }

    /// Running and pending jobs, pending sorted by sequence number
    pub async fn queue_snapshot(&self) -> QueueSnapshot {
        let state = self.state.lock().await;

        let queue_running = state
            .running
            .as_ref()
            .and_then(|id| state.jobs.get(id))
            .map(QueueEntry::from)
            .into_iter()
            .collect();

        let mut pending: Vec<&Job> = state.jobs.values().filter(|j| j.is_pending()).collect();
        pending.sort_by_key(|j| j.sequence);

        QueueSnapshot {
            queue_running,
            queue_pending: pending.into_iter().map(QueueEntry::from).collect(),
        }
    }

    /// Copy of a job, if known
    pub async fn get(&self, job_id: &str) -> Option<Job> {
        self.state.lock().await.jobs.get(job_id).cloned()
    }

    /// Claim the oldest pending job for processing
    ///
    /// No-op (`Ok(None)`) while another job holds the running slot, so it is
    /// safe to call redundantly.
    pub async fn start_next(&self) -> Result<Option<Job>> {
        let mut state = self.state.lock().await;
        if let Some(running) = &state.running {
            debug!(job_id = %running, "Job already processing, not starting another");
            return Ok(None);
        }

        let next_id = match state
            .jobs
            .values()
            .filter(|j| j.is_pending())
            .min_by_key(|j| j.sequence)
        {
            Some(job) => job.id.clone(),
            None => return Ok(None),
        };

        let now = self.time_provider.now_millis();
        let job = state
            .jobs
            .get_mut(&next_id)
            .ok_or_else(|| DomainError::JobNotFound(next_id.clone()))?;
        job.start(now)?;
        let started = job.clone();
        state.running = Some(next_id);

        Ok(Some(started))
    }

    /// Mark the running job completed with its output document and free the slot
    pub async fn complete(&self, job_id: &str, outputs: serde_json::Value) -> Result<()> {
        let now = self.time_provider.now_millis();
        let mut state = self.state.lock().await;

        if state.running.as_deref() != Some(job_id) {
            return Err(AppError::InvalidState(format!(
                "Job {} is not the running job",
                job_id
            )));
        }

        let job = state
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| DomainError::JobNotFound(job_id.to_string()))?;
        job.complete(outputs, now)?;
        state.running = None;
        drop(state);

        self.work_signal.notify_one();
        Ok(())
    }

    /// Wait until a submission or completion signals new work
    ///
    /// A signal sent while nobody is waiting is kept, so work submitted between
    /// a drain and this call is never missed.
    pub async fn wait_for_work(&self) {
        self.work_signal.notified().await;
    }

    /// Number of jobs known to the manager (all states)
    pub async fn len(&self) -> usize {
        self.state.lock().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
