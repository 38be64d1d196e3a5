//! Routing of records into per-event-type output files.
//!
//! For every entry in `outputFiles` the matching `eventFilters` entry is
//! turned into an [`EventFilter`]. A missing or unsupported filter, or a
//! failed write, only affects that one event type.

use crate::app_log::AppLog;
use crate::output::append_records;
use rr_common::{Error, Record};
use rr_config::{EventFilter, RouterConfig};
use std::path::PathBuf;
use tracing::debug;

/// What happened to one configured event type.
#[derive(Debug)]
pub enum RouteOutcome {
    /// Matching records were appended.
    Written { path: PathBuf, count: usize },
    /// The filter matched nothing; the file was not touched.
    NoMatches,
    /// The filter could not be built (`MissingFilter` or `UnsupportedFilter`).
    FilterRejected(Error),
    /// Appending failed (`Write`).
    WriteFailed(Error),
}

#[derive(Debug)]
pub struct RouteResult {
    pub event_type: String,
    pub outcome: RouteOutcome,
}

/// Per-event-type results of one categorization run, in event type order.
#[derive(Debug, Default)]
pub struct CategorizeReport {
    pub routes: Vec<RouteResult>,
}

impl CategorizeReport {
    /// Total number of records appended across all files.
    pub fn written(&self) -> usize {
        self.routes
            .iter()
            .map(|r| match r.outcome {
                RouteOutcome::Written { count, .. } => count,
                _ => 0,
            })
            .sum()
    }

    /// Number of event types that failed (filter or write).
    pub fn failures(&self) -> usize {
        self.routes
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    RouteOutcome::FilterRejected(_) | RouteOutcome::WriteFailed(_)
                )
            })
            .count()
    }

    pub fn get(&self, event_type: &str) -> Option<&RouteOutcome> {
        self.routes
            .iter()
            .find(|r| r.event_type == event_type)
            .map(|r| &r.outcome)
    }
}

/// Route `records` (already sorted by time) to their output files.
pub fn categorize(records: &[Record], config: &RouterConfig, log: &AppLog) -> CategorizeReport {
    let mut report = CategorizeReport::default();

    for (event_type, path) in &config.output_files {
        let outcome = route(event_type, path, records, config, log);
        report.routes.push(RouteResult {
            event_type: event_type.clone(),
            outcome,
        });
    }

    report
}

fn route(
    event_type: &str,
    path: &str,
    records: &[Record],
    config: &RouterConfig,
    log: &AppLog,
) -> RouteOutcome {
    let filter = match EventFilter::for_event_type(event_type, &config.event_filters) {
        Ok(filter) => filter,
        Err(e) => {
            log.error(format!("Error creating filter for {event_type}: {e}"));
            return RouteOutcome::FilterRejected(e.into());
        }
    };

    let matching: Vec<&Record> = records.iter().filter(|r| filter.matches(r)).collect();
    if matching.is_empty() {
        debug!(event_type, "no records matched filter");
        return RouteOutcome::NoMatches;
    }

    let path = PathBuf::from(path);
    match append_records(&path, matching) {
        Ok(count) => {
            debug!(event_type, count, path = %path.display(), "appended records");
            RouteOutcome::Written { path, count }
        }
        Err(e) => {
            log.error(format!("Error writing to file {}: {e}", path.display()));
            RouteOutcome::WriteFailed(e.into())
        }
    }
}
