//! Command-line entry point.

use crate::app_log::AppLog;
use crate::exit_codes::ExitCode;
use crate::logging::LogFormat;
use crate::pipeline::{process_pass, PassOutcome, PassState};
use crate::poller::Poller;
use clap::Parser;
use rr_config::{validate, RouterConfig, ValidationResult, DEFAULT_APP_LOG};
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Poll a log file and route embedded JSON records into per-event files.
#[derive(Debug, Parser)]
#[command(name = "rr-core", version, about)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: PathBuf,

    /// Application log file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_APP_LOG)]
    pub app_log: PathBuf,

    /// Stop after this many ticks instead of running until killed
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_ticks: Option<u64>,

    /// Validate the configuration, print findings as JSON, and exit
    #[arg(long)]
    pub check: bool,

    /// Increase stderr log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Stderr log format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Run the router until the tick limit, or forever.
pub fn run(cli: Cli) -> ExitCode {
    let config = match RouterConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::for_error(&e.into());
        }
    };

    let validation = validate(&config);
    if cli.check {
        let ok = validation.is_ok();
        let report = json!({
            "status": if ok { "ok" } else { "invalid" },
            "errors": &validation.errors,
            "warnings": &validation.warnings,
        });
        println!("{report:#}");
        return if ok {
            ExitCode::Clean
        } else {
            ExitCode::ConfigError
        };
    }

    for warning in &validation.warnings {
        warn!(field = %warning.field, "{}", warning.message);
    }
    if let Err(e) = check_validation(&validation) {
        for error in &validation.errors {
            eprintln!("Error in configuration: {error}");
        }
        return ExitCode::for_error(&e);
    }

    let log = AppLog::new(&cli.app_log);
    log.info(format!(
        "Started monitoring log file: {}",
        config.log_file_path
    ));

    let mut source = match open_source(&config) {
        Ok(file) => file,
        Err(e) => {
            log.error(format!("Error opening file: {e}"));
            eprintln!("Error opening file: {e}");
            return ExitCode::for_error(&e);
        }
    };

    // Validation already rejected an unparseable period.
    let period = match config.monitor_period() {
        Ok(period) => period,
        Err(e) => {
            log.error(format!("Invalid monitor period: {e}"));
            return ExitCode::for_error(&e.into());
        }
    };

    let mut poller = Poller::new(period);
    if let Some(max) = cli.max_ticks {
        poller = poller.with_max_ticks(max);
    }

    let mut state = PassState::default();
    poller.run(|tick| {
        let (next, outcome) = process_pass(std::mem::take(&mut state), &mut source, &config, &log);
        state = next;
        match outcome {
            PassOutcome::Skipped => debug!(tick, "pass skipped"),
            PassOutcome::Failed(e) => debug!(tick, code = e.code(), "pass failed"),
            PassOutcome::Processed(summary) => debug!(
                tick,
                records = summary.records,
                written = summary.report.written(),
                offset = state.offset,
                "pass processed"
            ),
        }
    });

    ExitCode::Clean
}

/// Collapse validation errors into a single startup error.
fn check_validation(validation: &ValidationResult) -> rr_common::Result<()> {
    if validation.is_ok() {
        return Ok(());
    }
    let fields: Vec<&str> = validation.errors.iter().map(|e| e.field.as_str()).collect();
    Err(rr_common::Error::Config(format!(
        "invalid fields: {}",
        fields.join(", ")
    )))
}

/// Open the source log once; the handle is reseeked on every pass.
fn open_source(config: &RouterConfig) -> rr_common::Result<File> {
    File::open(config.log_path()).map_err(|e| {
        rr_common::Error::SourceUnavailable(format!("{}: {e}", config.log_file_path))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_flag_is_required() {
        assert!(Cli::try_parse_from(["rr-core"]).is_err());
        let cli = Cli::try_parse_from(["rr-core", "-c", "router.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("router.json"));
        assert_eq!(cli.app_log, PathBuf::from(DEFAULT_APP_LOG));
        assert_eq!(cli.max_ticks, None);
    }

    #[test]
    fn test_max_ticks_must_be_positive() {
        assert!(Cli::try_parse_from(["rr-core", "-c", "r.json", "--max-ticks", "0"]).is_err());
        let args = ["rr-core", "-c", "r.json", "--max-ticks", "2", "-vv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.max_ticks, Some(2));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_open_source_missing_file() {
        let config = RouterConfig {
            log_file_path: "/nonexistent/source.log".to_string(),
            ..Default::default()
        };
        let err = open_source(&config).unwrap_err();
        assert_eq!(err.code(), 20);
        assert!(err.to_string().contains("/nonexistent/source.log"));
        assert_eq!(ExitCode::for_error(&err), ExitCode::IoError);
    }

    #[test]
    fn test_validation_errors_become_config_error() {
        let err = check_validation(&validate(&RouterConfig::default())).unwrap_err();
        assert_eq!(err.code(), 10);
        assert!(err.to_string().contains("logFilePath, monitorPeriod"), "{err}");
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
    }

    #[test]
    fn test_bad_period_becomes_config_error() {
        let config = RouterConfig {
            monitor_period: "0s".to_string(),
            ..Default::default()
        };
        let err: rr_common::Error = config.monitor_period().unwrap_err().into();
        assert_eq!(err.code(), 11);
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
    }
}
