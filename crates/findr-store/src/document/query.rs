//! Collection queries: equality filters and one ordering field

use std::cmp::Ordering;

use serde_json::Value;

use super::stored::Document;

/// Sort direction of an ordered query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Filter on a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Equal(String, Value),
}

impl Filter {
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Equal(field_path, expected) => doc.get(field_path) == Some(expected),
        }
    }
}

/// A query over one collection
///
/// Documents that lack the ordering field are left out of an ordered query,
/// the same way the hosted store behaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field_path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Equal(field_path.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field_path: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field_path.into(), direction));
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        let has_order_field = self
            .order_by
            .as_ref()
            .map_or(true, |(field_path, _)| doc.get(field_path).is_some());
        has_order_field && self.filters.iter().all(|filter| filter.matches(doc))
    }

    /// Select and order `docs`; ties on the ordering field fall back
    /// to document id in the same direction
    pub fn run<'a, I>(&self, docs: I) -> Vec<Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut selected: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.matches(doc))
            .cloned()
            .collect();

        if let Some((field_path, direction)) = &self.order_by {
            selected.sort_by(|a, b| {
                let by_field = match (a.get(field_path), b.get(field_path)) {
                    (Some(x), Some(y)) => compare_values(x, y),
                    _ => Ordering::Equal,
                };
                let ordering = by_field.then_with(|| a.id.cmp(&b.id));
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        } else {
            selected.sort_by_key(|doc| doc.id);
        }
        selected
    }
}

/// Total order over JSON values: null < bool < number < string < array < object
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(l, r))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => rank(a).cmp(&rank(b)),
    }
}
