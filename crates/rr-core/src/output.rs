//! Append-only newline-delimited JSON output files.

use rr_common::Record;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from appending records to an output file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directories for file {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error opening file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error marshalling entry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("error writing to file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<WriteError> for rr_common::Error {
    fn from(err: WriteError) -> Self {
        let path = match &err {
            WriteError::CreateDir { path, .. }
            | WriteError::Open { path, .. }
            | WriteError::Write { path, .. } => path.display().to_string(),
            WriteError::Encode(_) => String::new(),
        };
        rr_common::Error::Write {
            path,
            reason: err.to_string(),
        }
    }
}

/// Append `records` to `path`, one JSON object per line.
///
/// Parent directories are created as needed. The file is opened and closed
/// within this call.
pub fn append_records<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<usize, WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let mut content = String::new();
    let mut count = 0;
    for record in records {
        content.push_str(&serde_json::to_string(record)?);
        content.push('\n');
        count += 1;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| WriteError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

    file.write_all(content.as_bytes())
        .map_err(|e| WriteError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(count)
}
