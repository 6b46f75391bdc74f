//! Document model of the store: stored documents, field writes and queries

mod path;
mod query;
mod stored;
mod write;

pub use query::{compare_values, Direction, Filter, Query};
pub use stored::Document;
pub use write::{FieldWrite, Writes};
