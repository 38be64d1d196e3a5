//! Checksum gate.
//!
//! Hashes the whole source file on every tick and compares against the
//! digest from the previous processed pass. Cost is O(file size) per tick
//! regardless of how much content is new.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Result of comparing the current digest to the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Content identical to the last processed pass.
    Unchanged,
    /// Content differs (or no previous digest); carries the new digest.
    Changed(String),
}

/// Compute the hex-encoded SHA-256 digest of a file's full content.
pub fn file_checksum(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Compare `current` against the previous digest.
pub fn evaluate(previous: Option<&str>, current: String) -> Gate {
    match previous {
        Some(prev) if prev == current => Gate::Unchanged,
        _ => Gate::Changed(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_known_digest() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        assert_eq!(
            file_checksum(file.path()).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_tracks_content() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"line one\n").unwrap();
        let first = file_checksum(file.path()).unwrap();
        assert_eq!(first, file_checksum(file.path()).unwrap());

        file.write_all(b"line two\n").unwrap();
        file.flush().unwrap();
        assert_ne!(first, file_checksum(file.path()).unwrap());
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(file_checksum(Path::new("/nonexistent/source.log")).is_err());
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(None, "a".into()), Gate::Changed("a".into()));
        assert_eq!(evaluate(Some("a"), "a".into()), Gate::Unchanged);
        assert_eq!(evaluate(Some("a"), "b".into()), Gate::Changed("b".into()));
    }
}
