// Application Layer - Use Cases and Business Logic

pub mod queue_manager;
pub mod worker;

// Re-exports
pub use queue_manager::JobQueueManager;
pub use worker::{shutdown_channel, ShutdownSender, ShutdownToken, Worker};
