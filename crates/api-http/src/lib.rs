//! HTTP API Layer
//!
//! Implements the prompt submission API (`/prompt`, `/history/{id}`, `/queue`)
//! on top of the core job queue manager.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use server::{HttpServer, HttpServerConfig};
