//! Incremental record extraction from the source log.
//!
//! Reading starts at the stored byte offset and walks forward line by line.
//! Each line is searched for a greedy `{...}` span (first `{` to last `}`),
//! which is decoded as a [`Record`]. Lines without a span are skipped
//! silently; spans that fail to decode are logged and skipped.
//!
//! Only `\n`-terminated lines are consumed. A trailing partial line is left
//! in place and picked up on a later pass once the writer finishes it.

use crate::app_log::AppLog;
use regex::Regex;
use rr_common::{Error, Record, RecordKey, Result};
use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::sync::LazyLock;
use tracing::debug;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{.*\}").expect("JSON object pattern is valid"));

/// Records extracted from one read window.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Decoded, deduplicated records in read order.
    pub records: Vec<Record>,
    /// Lines dropped because their key was already seen.
    pub duplicates: usize,
    /// Lines whose embedded object failed to decode.
    pub malformed: usize,
    /// Offset just past the last consumed line.
    pub next_offset: u64,
    /// Whether the stored offset was beyond the end of the file.
    pub truncated: bool,
}

/// Return the embedded JSON object span in `line`, if any.
pub fn extract_object(line: &str) -> Option<&str> {
    JSON_OBJECT.find(line).map(|m| m.as_str())
}

/// Scan `source` from `offset`, deduplicating against `seen`.
///
/// A read error aborts the scan; nothing is returned from the partial window
/// so the caller can leave its offset untouched.
pub fn scan<R: Read + Seek>(
    source: &mut R,
    offset: u64,
    seen: &mut HashSet<RecordKey>,
    log: &AppLog,
) -> Result<ScanOutcome> {
    let len = source.seek(SeekFrom::End(0)).map_err(|e| Error::Seek {
        offset,
        reason: e.to_string(),
    })?;

    let mut outcome = ScanOutcome::default();
    let mut start = offset;
    if offset > len {
        log.warn(format!(
            "Log file shrank below last read position ({offset} > {len}), reading from the start."
        ));
        outcome.truncated = true;
        start = 0;
    }

    source
        .seek(SeekFrom::Start(start))
        .map_err(|e| Error::Seek {
            offset: start,
            reason: e.to_string(),
        })?;

    let mut reader = BufReader::new(source);
    let mut buf = Vec::new();
    let mut consumed = 0u64;
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 || buf.last() != Some(&b'\n') {
            break;
        }
        consumed += n as u64;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let Some(object) = extract_object(line) else {
            continue;
        };

        let record = match Record::from_json(object) {
            Ok(record) => record,
            Err(e) => {
                log.error(format!("Error parsing line: {line}, error: {e}"));
                outcome.malformed += 1;
                continue;
            }
        };

        if !seen.insert(record.key()) {
            log.info(format!(
                "Duplicate entry detected and skipped: {}",
                record.key()
            ));
            outcome.duplicates += 1;
            continue;
        }
        outcome.records.push(record);
    }

    outcome.next_offset = start + consumed;
    debug!(
        start,
        next_offset = outcome.next_offset,
        records = outcome.records.len(),
        "scanned source log"
    );
    Ok(outcome)
}
