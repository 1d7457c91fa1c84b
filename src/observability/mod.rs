//! # Observability
//!
//! Structured logging for the content server.

pub mod logger;

pub use logger::{Logger, Severity};
