//! Append-only application log.
//!
//! Every operational message is written as `[<RFC 3339 timestamp>] message`
//! to a fixed file, which is reopened for each message so that external
//! truncation or removal never wedges the router. Messages are mirrored to
//! `tracing` so they also reach the stderr subscriber.

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Severity of an application log message. The file itself is unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Handle to the application log file.
#[derive(Debug, Clone)]
pub struct AppLog {
    path: PathBuf,
}

impl AppLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.record(Level::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.record(Level::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.record(Level::Error, message.as_ref());
    }

    fn record(&self, level: Level, message: &str) {
        match level {
            Level::Info => info!(target: "rr_core::app_log", "{message}"),
            Level::Warn => warn!(target: "rr_core::app_log", "{message}"),
            Level::Error => error!(target: "rr_core::app_log", "{message}"),
        }

        let line = format_line(&Local::now(), message);
        if let Err(e) = self.append(&line) {
            error!(path = %self.path.display(), error = %e, "failed to write application log");
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

/// Format one application log line, including the trailing newline.
pub fn format_line<Tz: TimeZone>(timestamp: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "[{}] {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_format_line() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(
            format_line(&ts, "Started monitoring log file: a.log"),
            "[2024-03-01T12:30:00Z] Started monitoring log file: a.log\n"
        );
    }

    #[test]
    fn test_messages_append_in_order() {
        let tmp = TempDir::new().unwrap();
        let log = AppLog::new(tmp.path().join("applicationlogs.log"));
        log.info("first");
        log.error("second");
        log.warn("third");

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] second"));
        assert!(lines[2].ends_with("] third"));

        let stamp = &lines[0][1..lines[0].find(']').unwrap()];
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_recreated_after_removal() {
        let tmp = TempDir::new().unwrap();
        let log = AppLog::new(tmp.path().join("app.log"));
        log.info("before");
        std::fs::remove_file(log.path()).unwrap();
        log.info("after");

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("after"));
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let tmp = TempDir::new().unwrap();
        let log = AppLog::new(tmp.path().join("missing-dir").join("app.log"));
        log.error("dropped");
        assert!(!log.path().exists());
    }
}
