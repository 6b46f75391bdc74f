//! Value objects - immutable types that represent domain concepts

mod document_id;
mod text;

pub use document_id::{DocumentId, DocumentIdGenerator, DocumentIdParseError};
pub use text::NonEmptyText;
