//! # findr-core
//!
//! Domain layer containing entities, value objects, ports for the hosted
//! services (document store, identity provider, media library) and the live
//! subscription handle they hand out.
//! This crate has zero dependencies on infrastructure.

pub mod entities;
pub mod error;
pub mod subscription;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, ReactionKind, Reactions, StatusPost, UserProfile};
pub use error::DomainError;
pub use subscription::Subscription;
pub use traits::{
    CommentRepository, IdentityProvider, ImagePickerOptions, MediaLibrary, RepoResult,
    StatusRepository,
};
pub use value_objects::{DocumentId, DocumentIdGenerator, DocumentIdParseError, NonEmptyText};
