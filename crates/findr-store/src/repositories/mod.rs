//! Repository implementations
//!
//! Implementations of the repository traits defined in findr-core over the
//! in-memory document store. Each repository owns one collection.

mod comment;
mod error;
mod status;

pub use comment::StoreCommentRepository;
pub use status::StoreStatusRepository;
