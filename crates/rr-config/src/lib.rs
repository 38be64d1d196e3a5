//! Record Router configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the router's JSON configuration
//! - Duration parsing for the polling interval
//! - The event filter model used for routing
//! - Semantic validation

pub mod config;
pub mod filter;
pub mod validate;

pub use config::{ConfigError, RouterConfig};
pub use filter::{EventFilter, FilterError};
pub use validate::{validate, ValidationError, ValidationResult};

/// Name of the application log file written in the working directory.
pub const DEFAULT_APP_LOG: &str = "applicationlogs.log";
