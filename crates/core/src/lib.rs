// Prompt Mock Core - Domain Logic & Ports
// NO HTTP or filesystem dependencies

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
