//! In-memory document store with live queries
//!
//! Collections live in a `DashMap`; a write and the listener deliveries it
//! triggers happen under the same collection guard, so every listener sees
//! writes to a collection in commit order.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use findr_core::{DocumentId, DocumentIdGenerator, DomainError, RepoResult, Subscription};
use futures::channel::mpsc;
use futures::StreamExt;
use serde_json::Map;
use tracing::{debug, instrument, warn};

use super::clock::ServerClock;
use crate::document::{Document, Query, Writes};

type Delivery = RepoResult<Vec<Document>>;

struct Listener {
    id: u64,
    query: Query,
    tx: mpsc::UnboundedSender<Delivery>,
    /// Result set last delivered; unchanged results are not redelivered
    last: Vec<Document>,
}

#[derive(Default)]
struct Collection {
    docs: BTreeMap<DocumentId, Document>,
    listeners: Vec<Listener>,
}

impl Collection {
    /// Redeliver to every listener whose result set changed, pruning the
    /// ones whose receiver is gone
    fn notify(&mut self) {
        let docs = &self.docs;
        self.listeners.retain_mut(|listener| {
            let result = listener.query.run(docs.values());
            if result == listener.last {
                return !listener.tx.is_closed();
            }
            listener.last.clone_from(&result);
            listener.tx.unbounded_send(Ok(result)).is_ok()
        });
    }
}

struct StoreInner {
    collections: DashMap<String, Collection>,
    ids: DocumentIdGenerator,
    clock: ServerClock,
    next_listener: AtomicU64,
    available: AtomicBool,
    writes: AtomicU64,
}

impl StoreInner {
    fn remove_listener(&self, collection: &str, listener_id: u64) {
        if let Some(mut col) = self.collections.get_mut(collection) {
            col.listeners.retain(|l| l.id != listener_id);
        }
        debug!(collection, listener_id, "Listener released");
    }
}

/// Document store held entirely in memory
///
/// Cloning is cheap; clones share the same data.
#[derive(Clone)]
pub struct MemoryDocumentStore {
    inner: Arc<StoreInner>,
}

impl MemoryDocumentStore {
    /// Create an empty store whose ids carry `worker_id`
    pub fn new(worker_id: u16) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                collections: DashMap::new(),
                ids: DocumentIdGenerator::new(worker_id),
                clock: ServerClock::new(),
                next_listener: AtomicU64::new(1),
                available: AtomicBool::new(true),
                writes: AtomicU64::new(0),
            }),
        }
    }

    /// Add a document with a store-assigned id
    #[instrument(skip(self, writes))]
    pub fn add(&self, collection: &str, writes: &Writes) -> RepoResult<DocumentId> {
        self.begin_write()?;

        let id = self.inner.ids.generate();
        let commit_time = self.inner.clock.now();
        let mut fields = Map::new();
        writes.apply(&mut fields, commit_time);

        let mut col = self.inner.collections.entry(collection.to_string()).or_default();
        col.docs.insert(
            id,
            Document {
                id,
                fields,
                create_time: commit_time,
                update_time: commit_time,
            },
        );
        col.notify();

        debug!(collection, id = %id, "Document added");
        Ok(id)
    }

    /// Apply writes to an existing document
    #[instrument(skip(self, writes))]
    pub fn update(&self, collection: &str, id: DocumentId, writes: &Writes) -> RepoResult<()> {
        self.begin_write()?;

        let mut col = self
            .inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| DomainError::document_not_found(collection, id))?;
        let commit_time = self.inner.clock.now();
        let doc = col
            .docs
            .get_mut(&id)
            .ok_or_else(|| DomainError::document_not_found(collection, id))?;
        writes.apply(&mut doc.fields, commit_time);
        doc.update_time = commit_time;
        col.notify();

        debug!(collection, id = %id, "Document updated");
        Ok(())
    }

    /// Delete a document; deleting a missing document succeeds
    #[instrument(skip(self))]
    pub fn delete(&self, collection: &str, id: DocumentId) -> RepoResult<()> {
        self.begin_write()?;

        if let Some(mut col) = self.inner.collections.get_mut(collection) {
            if col.docs.remove(&id).is_some() {
                col.notify();
                debug!(collection, id = %id, "Document deleted");
            }
        }
        Ok(())
    }

    pub fn get(&self, collection: &str, id: DocumentId) -> RepoResult<Option<Document>> {
        self.ensure_available()?;
        Ok(self
            .inner
            .collections
            .get(collection)
            .and_then(|col| col.docs.get(&id).cloned()))
    }

    /// Register a live query
    ///
    /// The current result set is delivered immediately, then again after
    /// every write that changes it. Dropping or unsubscribing the returned
    /// handle detaches the listener.
    pub fn listen(&self, collection: &str, query: Query) -> Subscription<Vec<Document>> {
        let (tx, rx) = mpsc::unbounded();
        let listener_id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);

        {
            let mut col = self.inner.collections.entry(collection.to_string()).or_default();
            let initial = query.run(col.docs.values());
            // The receiver is still in scope, so this cannot fail
            let _ = tx.unbounded_send(Ok(initial.clone()));
            col.listeners.push(Listener {
                id: listener_id,
                query,
                tx,
                last: initial,
            });
        }
        debug!(collection, listener_id, "Listener registered");

        let weak: Weak<StoreInner> = Arc::downgrade(&self.inner);
        let collection = collection.to_string();
        Subscription::new(rx.boxed(), move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove_listener(&collection, listener_id);
            }
        })
    }

    /// Deliver `error` to every listener on `collection` and detach them,
    /// the way the hosted store terminates a listen stream on failure
    pub fn fail_listeners(&self, collection: &str, error: DomainError) {
        if let Some(mut col) = self.inner.collections.get_mut(collection) {
            let listeners = std::mem::take(&mut col.listeners);
            warn!(collection, count = listeners.len(), error = %error, "Terminating listeners");
            for listener in listeners {
                let _ = listener.tx.unbounded_send(Err(error.clone()));
            }
        }
    }

    /// Toggle connectivity; while unavailable every read and write fails
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.inner.available.load(Ordering::SeqCst)
    }

    /// Number of write requests received, successful or not
    pub fn write_count(&self) -> u64 {
        self.inner.writes.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self, collection: &str) -> usize {
        self.inner
            .collections
            .get(collection)
            .map_or(0, |col| col.listeners.len())
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.inner
            .collections
            .get(collection)
            .map_or(0, |col| col.docs.len())
    }

    fn begin_write(&self) -> RepoResult<()> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()
    }

    fn ensure_available(&self) -> RepoResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(DomainError::Unavailable(
                "Failed to reach the document store: the client is offline".to_string(),
            ))
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new(0)
    }
}
