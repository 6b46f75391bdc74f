//! Field writes: plain values and server-side transforms

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

use super::path;

/// One write to one field path
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    /// Store the value as given
    Set(Value),
    /// Store the commit time of the write
    ServerTimestamp,
    /// Add to the current number; a missing or non-numeric field becomes the delta
    Increment(i64),
}

/// Ordered set of field writes applied atomically to one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Writes(Vec<(String, FieldWrite)>);

impl Writes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field_path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((field_path.into(), FieldWrite::Set(value.into())));
        self
    }

    pub fn server_timestamp(mut self, field_path: impl Into<String>) -> Self {
        self.0.push((field_path.into(), FieldWrite::ServerTimestamp));
        self
    }

    pub fn increment(mut self, field_path: impl Into<String>, delta: i64) -> Self {
        self.0.push((field_path.into(), FieldWrite::Increment(delta)));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldWrite)> {
        self.0.iter().map(|(p, w)| (p.as_str(), w))
    }

    /// Apply every write to `fields`, resolving server timestamps to `commit_time`
    pub(crate) fn apply(&self, fields: &mut Map<String, Value>, commit_time: DateTime<Utc>) {
        for (field_path, write) in &self.0 {
            match write {
                FieldWrite::Set(value) => *path::slot(fields, field_path) = value.clone(),
                FieldWrite::ServerTimestamp => {
                    *path::slot(fields, field_path) = timestamp_value(commit_time);
                }
                FieldWrite::Increment(delta) => {
                    let slot = path::slot(fields, field_path);
                    let next = match slot.as_i64() {
                        Some(current) => current.saturating_add(*delta),
                        None => *delta,
                    };
                    *slot = Value::Number(Number::from(next));
                }
            }
        }
    }
}

/// Timestamps are stored as fixed-width RFC 3339 strings so that they sort
/// lexicographically in time order
pub(crate) fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Nanos, true))
}
