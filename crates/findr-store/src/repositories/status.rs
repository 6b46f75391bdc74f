//! Document store implementation of StatusRepository

use async_trait::async_trait;
use tracing::{info, instrument};

use findr_core::{DocumentId, NonEmptyText, ReactionKind, RepoResult, StatusPost};
use findr_core::{StatusRepository, Subscription};

use crate::document::{Direction, Query};
use crate::mappers::status_from_document;
use crate::memory::MemoryDocumentStore;
use crate::models::{status_fields, StatusModel};

use super::error::decode_all;

/// Status posts stored in one collection of a [`MemoryDocumentStore`]
#[derive(Clone)]
pub struct StoreStatusRepository {
    store: MemoryDocumentStore,
    collection: String,
}

impl StoreStatusRepository {
    /// Create a new StoreStatusRepository
    pub fn new(store: MemoryDocumentStore, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Feed query: newest first
    fn feed_query() -> Query {
        Query::new().order_by(status_fields::CREATED_AT, Direction::Descending)
    }
}

#[async_trait]
impl StatusRepository for StoreStatusRepository {
    #[instrument(skip(self, text), fields(len = text.as_str().len()))]
    async fn create(&self, text: &NonEmptyText) -> RepoResult<DocumentId> {
        let id = self
            .store
            .add(&self.collection, &StatusModel::create_writes(text))?;
        info!(id = %id, "Status created");
        Ok(id)
    }

    #[instrument(skip(self, text))]
    async fn update_text(&self, id: DocumentId, text: &NonEmptyText) -> RepoResult<()> {
        self.store
            .update(&self.collection, id, &StatusModel::edit_writes(text))?;
        info!(id = %id, "Status edited");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: DocumentId) -> RepoResult<()> {
        self.store.delete(&self.collection, id)?;
        info!(id = %id, "Status deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_reaction(&self, id: DocumentId, kind: ReactionKind) -> RepoResult<()> {
        self.store
            .update(&self.collection, id, &StatusModel::react_writes(kind))
    }

    #[instrument(skip(self))]
    async fn increment_comments(&self, id: DocumentId) -> RepoResult<()> {
        self.store
            .update(&self.collection, id, &StatusModel::comment_count_writes())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: DocumentId) -> RepoResult<Option<StatusPost>> {
        self.store
            .get(&self.collection, id)?
            .map(|doc| status_from_document(&self.collection, &doc))
            .transpose()
    }

    fn watch_feed(&self) -> Subscription<Vec<StatusPost>> {
        let collection = self.collection.clone();
        self.store
            .listen(&self.collection, Self::feed_query())
            .and_then(move |docs| {
                Ok(decode_all(&docs, |doc| status_from_document(&collection, doc)))
            })
    }
}
