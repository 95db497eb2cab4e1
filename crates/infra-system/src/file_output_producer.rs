// File output producer
// reason: tokio::fs so the copy never blocks a runtime thread
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use promptmock_core::domain::output::artifact_filename;
use promptmock_core::port::output_producer::{OutputError, OutputProducer};

/// Copies one fixed source asset to `<output_dir>/output_<short id>.jpg`
///
/// Each job writes its own file name, so concurrent producers never collide.
pub struct FileOutputProducer {
    source_path: PathBuf,
    output_dir: PathBuf,
}

impl FileOutputProducer {
    /// Create a new file output producer
    ///
    /// # Arguments
    /// * `source_path` - Asset copied for every completed job
    /// * `output_dir` - Directory receiving the artifacts (created on demand)
    ///
    /// # Example
    /// ```ignore
    /// let producer = FileOutputProducer::new("resources/image.jpg", "outputs");
    /// ```
    pub fn new(source_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Destination path of a job's artifact
    pub fn artifact_path(&self, job_id: &str) -> PathBuf {
        self.output_dir.join(artifact_filename(job_id))
    }
}

#[async_trait]
impl OutputProducer for FileOutputProducer {
    async fn produce(&self, job_id: &str) -> Result<PathBuf, OutputError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| OutputError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;

        // Checked up front so a missing asset gets its own error
        if !tokio::fs::try_exists(&self.source_path).await.unwrap_or(false) {
            return Err(OutputError::SourceMissing(self.source_path.clone()));
        }

        let dest = self.artifact_path(job_id);
        let bytes = tokio::fs::copy(&self.source_path, &dest)
            .await
            .map_err(|source| OutputError::Copy {
                path: dest.clone(),
                source,
            })?;

        debug!(job_id = %job_id, dest = %dest.display(), bytes, "Copied source asset");
        Ok(dest)
    }
}
