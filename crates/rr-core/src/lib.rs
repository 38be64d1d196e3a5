//! Record Router core library.
//!
//! Polls a growing log file, extracts JSON records embedded in its lines,
//! and appends them to per-event-type output files.
//!
//! # Pipeline
//!
//! ```text
//! Poller tick ──► checksum gate ──► scan from offset ──► sort by timeMs
//!                     │                                       │
//!                     └─ unchanged: skip                      ▼
//!                                                  categorize ──► output files
//! ```
//!
//! Every step reports to the [`app_log::AppLog`].

pub mod app_log;
pub mod categorize;
pub mod checksum;
pub mod cli;
pub mod exit_codes;
pub mod logging;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod poller;

pub use app_log::AppLog;
pub use exit_codes::ExitCode;
pub use pipeline::{process_pass, PassOutcome, PassState};
