// Prompt Mock Infrastructure - System Adapters
// Implements: OutputProducer, ProcessingDelay

pub mod file_output_producer;
pub mod uniform_delay;

pub use file_output_producer::FileOutputProducer;
pub use uniform_delay::UniformDelay;
