//! Document <-> entity mappers

mod comment;
mod status;

pub use comment::comment_from_document;
pub use status::status_from_document;
