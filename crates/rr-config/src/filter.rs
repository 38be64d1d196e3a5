//! Event filter model.
//!
//! A filter is configured either as a single allowed event type or as a list
//! of allowed event types. Anything else is rejected when the filter is
//! built, which only disables the event type it belongs to.

use rr_common::Record;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors from building a filter for one event type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("no filter found for event type: {0}")]
    Missing(String),

    #[error("unsupported filter type for event type: {event_type} (got {found})")]
    Unsupported { event_type: String, found: String },
}

impl From<FilterError> for rr_common::Error {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::Missing(event_type) => rr_common::Error::MissingFilter { event_type },
            FilterError::Unsupported { event_type, .. } => {
                rr_common::Error::UnsupportedFilter { event_type }
            }
        }
    }
}

/// Predicate over a record's event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// Event type must equal this value.
    Exact(String),
    /// Event type must be one of these values.
    AnyOf(BTreeSet<String>),
}

impl EventFilter {
    /// Build a filter from its raw JSON shape.
    pub fn from_value(event_type: &str, value: &Value) -> Result<Self, FilterError> {
        match value {
            Value::String(allowed) => Ok(EventFilter::Exact(allowed.clone())),
            Value::Array(items) => {
                let mut allowed = BTreeSet::new();
                for item in items {
                    match item {
                        Value::String(s) => {
                            allowed.insert(s.clone());
                        }
                        other => {
                            return Err(FilterError::Unsupported {
                                event_type: event_type.to_string(),
                                found: format!("list containing {}", json_kind(other)),
                            })
                        }
                    }
                }
                Ok(EventFilter::AnyOf(allowed))
            }
            other => Err(FilterError::Unsupported {
                event_type: event_type.to_string(),
                found: json_kind(other).to_string(),
            }),
        }
    }

    /// Look up and build the filter for `event_type`.
    pub fn for_event_type(
        event_type: &str,
        filters: &BTreeMap<String, Value>,
    ) -> Result<Self, FilterError> {
        let value = filters
            .get(event_type)
            .ok_or_else(|| FilterError::Missing(event_type.to_string()))?;
        Self::from_value(event_type, value)
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            EventFilter::Exact(allowed) => record.event_type == *allowed,
            EventFilter::AnyOf(allowed) => allowed.contains(&record.event_type),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
