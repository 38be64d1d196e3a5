//! Record Router common types and errors.
//!
//! This crate provides foundational types shared across rr-core modules:
//! - The telemetry record and its deduplication identity
//! - Common error types

pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::{Record, RecordKey};
