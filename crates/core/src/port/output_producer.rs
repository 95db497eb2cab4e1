// Output Producer Port
// Side-effect artifact production for completed jobs

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Output production errors (logged by the worker, never surfaced to clients)
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Source asset not found: {0}")]
    SourceMissing(PathBuf),

    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy artifact to {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Output Producer trait
///
/// Implementations:
/// - FileOutputProducer: copies a fixed asset into the output directory
#[async_trait]
pub trait OutputProducer: Send + Sync {
    /// Write the artifact for a job and return its path
    ///
    /// # Errors
    /// - OutputError::SourceMissing if the asset to copy does not exist
    /// - OutputError::CreateDir if the output directory cannot be created
    /// - OutputError::Copy if the copy itself fails
    async fn produce(&self, job_id: &str) -> Result<PathBuf, OutputError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock producer behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always succeed
        Success,
        /// Always fail as if the source asset were missing
        MissingSource,
    }

    /// Mock Output Producer for testing
    pub struct MockOutputProducer {
        behavior: MockBehavior,
        produced: Arc<Mutex<Vec<String>>>,
    }

    impl MockOutputProducer {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                produced: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }
        pub fn new_missing_source() -> Self {
            Self::new(MockBehavior::MissingSource)
        }
        pub fn call_count(&self) -> usize {
            self.produced.lock().unwrap().len()
        }
        /// Job ids in the order they were produced
        pub fn produced(&self) -> Vec<String> {
            self.produced.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OutputProducer for MockOutputProducer {
        async fn produce(&self, job_id: &str) -> Result<PathBuf, OutputError> {
            self.produced.lock().unwrap().push(job_id.to_string());

            match self.behavior {
                MockBehavior::Success => Ok(PathBuf::from(crate::domain::output::artifact_filename(
                    job_id,
                ))),
                MockBehavior::MissingSource => {
                    Err(OutputError::SourceMissing(PathBuf::from("missing.jpg")))
                }
            }
        }
    }
}
