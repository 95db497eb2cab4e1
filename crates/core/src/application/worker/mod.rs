// Worker - Job processing loop

pub mod constants;
mod shutdown;

use constants::*;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::queue_manager::JobQueueManager;
use crate::domain::{output, Job};
use crate::error::Result;
use crate::port::{OutputProducer, ProcessingDelay};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Worker drains the queue one job at a time
///
/// There is exactly one worker per manager; it is the only caller of
/// `start_next`/`complete`, which keeps at most one job processing.
pub struct Worker {
    manager: Arc<JobQueueManager>,
    output_producer: Arc<dyn OutputProducer>,
    delay: Arc<dyn ProcessingDelay>,
}

impl Worker {
    pub fn new(
        manager: Arc<JobQueueManager>,
        output_producer: Arc<dyn OutputProducer>,
        delay: Arc<dyn ProcessingDelay>,
    ) -> Self {
        Self {
            manager,
            output_producer,
            delay,
        }
    }

    /// Run worker loop with graceful shutdown support
    ///
    /// Sleeps until a submission signals work, then processes pending jobs in
    /// sequence order until none are left. A job in progress always finishes
    /// before shutdown is observed.
    pub async fn run(&self, mut shutdown: ShutdownToken) -> Result<()> {
        info!("Worker started");
        loop {
            if shutdown.is_shutdown() {
                info!("Worker shutting down");
                break;
            }
            match self.process_next_job().await {
                Ok(true) => continue,
                Ok(false) => {
                    tokio::select! {
                        _ = self.manager.wait_for_work() => {},
                        _ = shutdown.wait() => {
                            info!("Worker interrupted during idle");
                            break;
                        }
                    }
                }
                Err(e) => {
                    error!("Worker error: {}", e);
                    tokio::select! {
                        _ = sleep(ERROR_RECOVERY_SLEEP_DURATION) => {},
                        _ = shutdown.wait() => {
                            info!("Worker interrupted during error recovery");
                            break;
                        }
                    }
                }
            }
        }
        info!("Worker stopped");
        Ok(())
    }

    /// Process next pending job (returns true if a job was processed)
    pub async fn process_next_job(&self) -> Result<bool> {
        let job = match self.manager.start_next().await? {
            Some(j) => j,
            None => return Ok(false),
        };

        let delay = self.delay.next_delay();
        info!(
            job_id = %job.id,
            sequence = job.sequence,
            client_id = %job.client_id,
            delay = ?delay,
            "Processing job"
        );
        sleep(delay).await;

        self.produce_artifact(&job).await;

        self.manager
            .complete(&job.id, output::image_outputs(&job.id))
            .await?;
        info!(job_id = %job.id, "Job completed");
        Ok(true)
    }

    /// Best-effort artifact production: failures are logged, never propagated
    ///
    /// Runs on a spawned task so a panicking producer cannot take the worker down.
    async fn produce_artifact(&self, job: &Job) {
        let producer = Arc::clone(&self.output_producer);
        let job_id = job.id.clone();

        let handle = tokio::task::spawn(async move { producer.produce(&job_id).await });

        match handle.await {
            Ok(Ok(path)) => {
                info!(job_id = %job.id, path = %path.display(), "Output artifact written");
            }
            Ok(Err(e)) => {
                warn!(job_id = %job.id, error = %e, "Output artifact production failed");
            }
            Err(join_err) => {
                error!(job_id = %job.id, error = ?join_err, "Output producer panicked");
            }
        }
    }
}
