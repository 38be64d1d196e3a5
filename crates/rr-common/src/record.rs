//! Telemetry record and identity types.
//!
//! A [`Record`] is one structured telemetry entry extracted from a log line.
//! Two records with the same [`RecordKey`] inside one read window are
//! considered duplicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One telemetry entry decoded from an embedded JSON object.
///
/// Decoding is best-effort: absent fields take their zero value and unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "timeMs")]
    pub time_ms: i64,
    #[serde(rename = "streamId")]
    pub stream_id: String,
    /// Categorization key matched against event filters.
    #[serde(rename = "eventType", skip_serializing_if = "String::is_empty")]
    pub event_type: String,
    #[serde(rename = "totalByteReceived")]
    pub total_bytes_received: i64,
    #[serde(rename = "byteTransferred")]
    pub bytes_transferred: i64,
    #[serde(rename = "durationMs")]
    pub duration_ms: i64,
    pub width: i64,
    pub height: i64,
}

impl Record {
    /// Identity used for deduplication.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            time_ms: self.time_ms,
            stream_id: self.stream_id.clone(),
            event_type: self.event_type.clone(),
        }
    }

    /// Decode a record from a JSON object string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::MalformedRecord(e.to_string()))
    }
}

/// Record identity: (timestamp, stream id, event type).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub time_ms: i64,
    pub stream_id: String,
    pub event_type: String,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.time_ms, self.stream_id, self.event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let json = r#"{"timeMs":1700000000000,"streamId":"s-1","eventType":"play",
            "totalByteReceived":2048,"byteTransferred":1024,"durationMs":350,
            "width":1920,"height":1080}"#;
        let record = Record::from_json(json).unwrap();
        assert_eq!(record.time_ms, 1_700_000_000_000);
        assert_eq!(record.stream_id, "s-1");
        assert_eq!(record.event_type, "play");
        assert_eq!(record.total_bytes_received, 2048);
        assert_eq!(record.bytes_transferred, 1024);
        assert_eq!(record.duration_ms, 350);
        assert_eq!(record.width, 1920);
        assert_eq!(record.height, 1080);
    }

    #[test]
    fn test_missing_fields_default_and_extra_fields_ignored() {
        let record = Record::from_json(r#"{"timeMs":5,"codec":"h264"}"#).unwrap();
        assert_eq!(record.time_ms, 5);
        assert!(record.stream_id.is_empty());
        assert!(record.event_type.is_empty());
        assert_eq!(record.width, 0);
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let err = Record::from_json(r#"{"timeMs":"soon"}"#).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedRecord(_)));
    }

    #[test]
    fn test_empty_event_type_not_serialized() {
        let record = Record {
            time_ms: 1,
            stream_id: "a".into(),
            ..Default::default()
        };
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains("eventType"));
        assert!(line.contains("\"totalByteReceived\":0"));
    }

    #[test]
    fn test_written_line_decodes_to_equal_record() {
        let record = Record {
            time_ms: 42,
            stream_id: "cam-7".into(),
            event_type: "upload".into(),
            total_bytes_received: 9,
            bytes_transferred: 8,
            duration_ms: 7,
            width: 640,
            height: 480,
        };
        let line = serde_json::to_string(&record).unwrap();
        assert_eq!(Record::from_json(&line).unwrap(), record);
    }

    #[test]
    fn test_large_dimensions_decode() {
        let record =
            Record::from_json(r#"{"timeMs":1,"width":3000000000,"height":-3000000000}"#).unwrap();
        assert_eq!(record.width, 3_000_000_000);
        assert_eq!(record.height, -3_000_000_000);
    }

    #[test]
    fn test_key_includes_event_type() {
        let mut a = Record {
            time_ms: 10,
            stream_id: "s".into(),
            event_type: "play".into(),
            ..Default::default()
        };
        let b = a.clone();
        assert_eq!(a.key(), b.key());
        a.event_type = "pause".into();
        assert_ne!(a.key(), b.key());
        assert_eq!(b.key().to_string(), "10-s-play");
    }
}
