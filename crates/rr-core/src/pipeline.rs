//! One polling pass: checksum gate, scan, sort, categorize.
//!
//! ```text
//! process_pass(state) ──► checksum ──┬─ unchanged → log "skipping", return state
//!                                    └─ changed   → store digest
//!                                                   → scan from offset
//!                                                   → sort by timeMs
//!                                                   → categorize
//!                                                   → clear dedup set, advance offset
//! ```
//!
//! All state that survives between passes lives in [`PassState`], which is
//! moved in and handed back so a pass has no hidden side effects beyond the
//! files it touches.

use crate::app_log::AppLog;
use crate::categorize::{categorize, CategorizeReport};
use crate::checksum::{self, Gate};
use crate::parse;
use rr_common::{Error, RecordKey};
use rr_config::RouterConfig;
use std::collections::HashSet;
use std::io::{Read, Seek};

/// State carried from one pass to the next.
#[derive(Debug, Clone, Default)]
pub struct PassState {
    /// Digest of the source file at the last processed pass.
    pub last_checksum: Option<String>,
    /// Byte offset just past the last consumed line.
    pub offset: u64,
    /// Keys seen in the current read window. Emptied after every pass.
    pub seen: HashSet<RecordKey>,
}

/// Counts from a pass that processed new content.
#[derive(Debug)]
pub struct PassSummary {
    pub records: usize,
    pub duplicates: usize,
    pub malformed: usize,
    pub report: CategorizeReport,
}

#[derive(Debug)]
pub enum PassOutcome {
    /// Source unchanged since the last processed pass.
    Skipped,
    /// A step failed; the pass was abandoned.
    Failed(Error),
    Processed(PassSummary),
}

impl PassOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, PassOutcome::Skipped)
    }
}

/// Run one pass over `source`.
///
/// A checksum failure leaves `state` untouched. A scan failure happens after
/// the new digest is stored, so the same content is not retried until the
/// file changes again.
pub fn process_pass<S: Read + Seek>(
    mut state: PassState,
    source: &mut S,
    config: &RouterConfig,
    log: &AppLog,
) -> (PassState, PassOutcome) {
    let digest = match checksum::file_checksum(config.log_path()) {
        Ok(digest) => digest,
        Err(e) => {
            log.error(format!("Error calculating checksum: {e}"));
            return (state, PassOutcome::Failed(Error::Checksum(e.to_string())));
        }
    };

    match checksum::evaluate(state.last_checksum.as_deref(), digest) {
        Gate::Unchanged => {
            log.info("No changes detected in the log file, skipping processing.");
            return (state, PassOutcome::Skipped);
        }
        Gate::Changed(digest) => state.last_checksum = Some(digest),
    }

    let scanned = match parse::scan(source, state.offset, &mut state.seen, log) {
        Ok(scanned) => scanned,
        Err(e) => {
            log.error(format!("Error parsing log file: {e}"));
            state.seen.clear();
            return (state, PassOutcome::Failed(e));
        }
    };

    let mut records = scanned.records;
    records.sort_by_key(|r| r.time_ms);

    let report = categorize(&records, config, log);
    if report.failures() > 0 {
        log.error(format!(
            "Error categorizing log entries: {} event type(s) failed",
            report.failures()
        ));
    }

    state.seen.clear();
    state.offset = scanned.next_offset;

    log.info(format!(
        "Processed {} new entries ({} duplicates, {} malformed), wrote {}.",
        records.len(),
        scanned.duplicates,
        scanned.malformed,
        report.written()
    ));

    let summary = PassSummary {
        records: records.len(),
        duplicates: scanned.duplicates,
        malformed: scanned.malformed,
        report,
    };
    (state, PassOutcome::Processed(summary))
}
