//! Dotted field paths (`reactions.like`) over JSON maps

use serde_json::{Map, Value};

/// Look up a dotted path inside a field map
pub(crate) fn get<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = fields.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Mutable slot for a dotted path, creating intermediate maps on the way
///
/// A non-map value sitting on an intermediate segment is replaced by a map.
pub(crate) fn slot<'a>(fields: &'a mut Map<String, Value>, path: &str) -> &'a mut Value {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = segments.pop().unwrap_or(path);
    let mut current = fields;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just made an object"),
        };
    }
    current.entry(last.to_string()).or_insert(Value::Null)
}
