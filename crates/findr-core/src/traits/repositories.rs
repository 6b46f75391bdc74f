//! Repository traits (ports) over the hosted document store
//!
//! The domain layer defines what the screens need; the store crate maps
//! these calls onto collection reads, writes and live queries.

use async_trait::async_trait;

use crate::entities::{Comment, ReactionKind, StatusPost};
use crate::error::DomainError;
use crate::subscription::Subscription;
use crate::value_objects::{DocumentId, NonEmptyText};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Status Repository
// ============================================================================

#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Add a post with no reactions, zero comments and a server timestamp
    async fn create(&self, text: &NonEmptyText) -> RepoResult<DocumentId>;

    /// Overwrite the body and stamp `updatedAt`
    async fn update_text(&self, id: DocumentId, text: &NonEmptyText) -> RepoResult<()>;

    async fn delete(&self, id: DocumentId) -> RepoResult<()>;

    /// Atomically add one to `reactions.<kind>`
    async fn increment_reaction(&self, id: DocumentId, kind: ReactionKind) -> RepoResult<()>;

    /// Atomically add one to `commentsCount`
    async fn increment_comments(&self, id: DocumentId) -> RepoResult<()>;

    async fn find_by_id(&self, id: DocumentId) -> RepoResult<Option<StatusPost>>;

    /// Live feed, newest first; every delivery is the full ordered set
    fn watch_feed(&self) -> Subscription<Vec<StatusPost>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Add a comment under `status_id` with a server timestamp
    async fn create(&self, status_id: DocumentId, text: &NonEmptyText) -> RepoResult<DocumentId>;

    /// Live thread for one status, oldest first
    fn watch_thread(&self, status_id: DocumentId) -> Subscription<Vec<Comment>>;
}
