//! Stored document

use chrono::{DateTime, Utc};
use findr_core::DocumentId;
use serde_json::{Map, Value};

use super::path;

/// A document as held by the store and delivered to readers
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Map<String, Value>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl Document {
    /// Value at a dotted field path
    pub fn get(&self, field_path: &str) -> Option<&Value> {
        path::get(&self.fields, field_path)
    }

    pub fn get_str(&self, field_path: &str) -> Option<&str> {
        self.get(field_path).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field_path: &str) -> Option<i64> {
        self.get(field_path).and_then(Value::as_i64)
    }

    /// The fields as a JSON object, for deserializing into a model
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
