//! Ports implemented by the infrastructure crates

mod identity;
mod media;
mod repositories;

pub use identity::IdentityProvider;
pub use media::{ImagePickerOptions, MediaLibrary};
pub use repositories::{CommentRepository, RepoResult, StatusRepository};
