//! Domain entities - projections of the records owned by the hosted services

mod comment;
mod reaction;
mod status;
mod user;

pub use comment::Comment;
pub use reaction::{ReactionKind, Reactions, UnknownReactionKind};
pub use status::StatusPost;
pub use user::UserProfile;
