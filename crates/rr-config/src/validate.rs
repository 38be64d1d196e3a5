//! Semantic validation of a loaded configuration.
//!
//! Errors block startup; warnings are reported and the router runs anyway.

use crate::config::RouterConfig;
use crate::filter::EventFilter;
use serde::Serialize;

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Config field the finding refers to (e.g. `eventFilters.playback`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a configuration for problems that decoding alone does not catch.
pub fn validate(config: &RouterConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if config.log_file_path.trim().is_empty() {
        result
            .errors
            .push(ValidationError::new("logFilePath", "must not be empty"));
    }

    if let Err(e) = config.monitor_period() {
        result
            .errors
            .push(ValidationError::new("monitorPeriod", e.to_string()));
    }

    if let Err(e) = config.batch_interval() {
        result
            .warnings
            .push(ValidationError::new("batchInterval", e.to_string()));
    }

    if config.output_files.is_empty() {
        result.warnings.push(ValidationError::new(
            "outputFiles",
            "no output files configured; records will be read but not routed",
        ));
    }

    for (event_type, path) in &config.output_files {
        let field = format!("outputFiles.{event_type}");
        if path.trim().is_empty() {
            result.warnings.push(ValidationError::new(
                field,
                "destination path is empty; writes for this event type will fail",
            ));
            continue;
        }
        if !config.event_filters.contains_key(event_type) {
            result.warnings.push(ValidationError::new(
                field,
                "no matching entry in eventFilters; this event type will be skipped",
            ));
        }
    }

    for (event_type, value) in &config.event_filters {
        let field = format!("eventFilters.{event_type}");
        if let Err(e) = EventFilter::from_value(event_type, value) {
            result.warnings.push(ValidationError::new(field, e.to_string()));
        } else if !config.output_files.contains_key(event_type) {
            result.warnings.push(ValidationError::new(
                field,
                "no matching entry in outputFiles; filter is unused",
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(findings: &[ValidationError]) -> Vec<&str> {
        findings.iter().map(|f| f.field.as_str()).collect()
    }

    #[test]
    fn test_valid_config() {
        let config = RouterConfig::from_json(
            r#"{"logFilePath": "in.log", "outputFiles": {"playback": "out/p.log"},
                "eventFilters": {"playback": "play"}, "monitorPeriod": "5s"}"#,
        )
        .unwrap();
        let result = validate(&config);
        assert!(result.is_ok());
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_empty_config_has_errors() {
        let result = validate(&RouterConfig::default());
        assert!(!result.is_ok());
        assert_eq!(fields(&result.errors), vec!["logFilePath", "monitorPeriod"]);
        assert_eq!(fields(&result.warnings), vec!["outputFiles"]);
    }

    #[test]
    fn test_mismatched_maps_warn() {
        let config = RouterConfig::from_json(
            r#"{"logFilePath": "in.log", "monitorPeriod": "1m",
                "outputFiles": {"a": "a.log", "b": "b.log"},
                "eventFilters": {"b": 12, "c": "x"}, "batchInterval": "whenever"}"#,
        )
        .unwrap();
        let result = validate(&config);
        assert!(result.is_ok());
        assert_eq!(
            fields(&result.warnings),
            vec![
                "batchInterval",
                "outputFiles.a",
                "eventFilters.b",
                "eventFilters.c"
            ]
        );
    }

    #[test]
    fn test_empty_destination_only_warns() {
        let config = RouterConfig::from_json(
            r#"{"logFilePath": "in.log", "monitorPeriod": "1m",
                "outputFiles": {"a": "", "b": "b.log"},
                "eventFilters": {"a": "x", "b": "y"}}"#,
        )
        .unwrap();
        let result = validate(&config);
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(fields(&result.warnings), vec!["outputFiles.a"]);
    }
}
