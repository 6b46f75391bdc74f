//! Document store implementation of CommentRepository

use async_trait::async_trait;
use tracing::{info, instrument};

use findr_core::{Comment, CommentRepository, DocumentId, NonEmptyText, RepoResult, Subscription};

use crate::document::{Direction, Query};
use crate::mappers::comment_from_document;
use crate::memory::MemoryDocumentStore;
use crate::models::{comment_fields, CommentModel};

use super::error::decode_all;

/// Comments stored in one collection of a [`MemoryDocumentStore`]
#[derive(Clone)]
pub struct StoreCommentRepository {
    store: MemoryDocumentStore,
    collection: String,
}

impl StoreCommentRepository {
    /// Create a new StoreCommentRepository
    pub fn new(store: MemoryDocumentStore, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Thread query: one status, oldest first
    fn thread_query(status_id: DocumentId) -> Query {
        Query::new()
            .where_eq(comment_fields::STATUS_ID, status_id.to_string())
            .order_by(comment_fields::CREATED_AT, Direction::Ascending)
    }
}

#[async_trait]
impl CommentRepository for StoreCommentRepository {
    #[instrument(skip(self, text))]
    async fn create(&self, status_id: DocumentId, text: &NonEmptyText) -> RepoResult<DocumentId> {
        let id = self
            .store
            .add(&self.collection, &CommentModel::create_writes(status_id, text))?;
        info!(id = %id, status_id = %status_id, "Comment created");
        Ok(id)
    }

    fn watch_thread(&self, status_id: DocumentId) -> Subscription<Vec<Comment>> {
        let collection = self.collection.clone();
        self.store
            .listen(&self.collection, Self::thread_query(status_id))
            .and_then(move |docs| {
                Ok(decode_all(&docs, |doc| comment_from_document(&collection, doc)))
            })
    }
}
