//! Shared fixtures for the screen unit tests

use std::sync::Arc;

use findr_core::{IdentityProvider, UserProfile};
use findr_store::{
    MemoryDocumentStore, MemoryIdentityProvider, MemoryMediaLibrary, StoreCommentRepository,
    StoreStatusRepository,
};

use crate::shell::RecordingShell;

use super::context::{ServiceContext, ServiceContextBuilder};

pub const STATUSES: &str = "statuses";
pub const COMMENTS: &str = "comments";

/// In-memory backends behind one test context
pub struct Backends {
    pub store: MemoryDocumentStore,
    pub identity: MemoryIdentityProvider,
    pub media: MemoryMediaLibrary,
    pub shell: RecordingShell,
}

impl Backends {
    pub fn new() -> Self {
        Self {
            store: MemoryDocumentStore::new(1),
            identity: MemoryIdentityProvider::default(),
            media: MemoryMediaLibrary::default(),
            shell: RecordingShell::new(),
        }
    }

    /// Create an account and leave nobody signed in
    pub async fn seed_account(&self, email: &str, password: &str) -> UserProfile {
        let user = self.identity.create_account(email, password).await.unwrap();
        self.identity.sign_out().await.unwrap();
        user
    }

    /// Create an account and stay signed in
    pub async fn signed_in(&self, email: &str, password: &str) -> UserProfile {
        self.identity.create_account(email, password).await.unwrap()
    }
}

pub fn context(backends: &Backends) -> ServiceContext {
    ServiceContextBuilder::new()
        .status_repo(Arc::new(StoreStatusRepository::new(
            backends.store.clone(),
            STATUSES,
        )))
        .comment_repo(Arc::new(StoreCommentRepository::new(
            backends.store.clone(),
            COMMENTS,
        )))
        .identity(Arc::new(backends.identity.clone()))
        .media(Arc::new(backends.media.clone()))
        .shell(Arc::new(backends.shell.clone()))
        .build()
        .unwrap()
}
