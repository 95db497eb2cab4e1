// Domain Layer - Pure business logic and entities

pub mod error;
pub mod history;
pub mod job;
pub mod output;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use history::{ExecutionMessage, ExecutionStatus, HistoryEntry};
pub use job::{Job, JobId, JobPayload, JobStatus, SequenceNumber};
pub use queue::{QueueEntry, QueueSnapshot};
