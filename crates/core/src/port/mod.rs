// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod output_producer;
pub mod processing_delay;
pub mod time_provider;

// Re-exports
pub use id_provider::{IdProvider, SequentialIdProvider, UuidProvider};
pub use output_producer::{OutputError, OutputProducer};
pub use processing_delay::{FixedDelay, ProcessingDelay};
pub use time_provider::{ManualTimeProvider, SystemTimeProvider, TimeProvider};
