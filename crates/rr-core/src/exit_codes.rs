//! Exit codes for the rr-core CLI.
//!
//! Exit codes communicate the startup outcome without requiring output
//! parsing. A missing or malformed flag is rejected by clap with status 2.

/// Exit codes for rr-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Clean exit (tick limit reached, or `--check` passed)
    Clean = 0,

    /// Configuration could not be loaded or failed validation
    ConfigError = 10,

    /// Source log could not be opened
    IoError = 13,
}

impl ExitCode {
    /// Exit code for a startup failure.
    pub fn for_error(err: &rr_common::Error) -> Self {
        match err {
            rr_common::Error::Config(_) | rr_common::Error::InvalidDuration { .. } => {
                ExitCode::ConfigError
            }
            _ => ExitCode::IoError,
        }
    }

    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
