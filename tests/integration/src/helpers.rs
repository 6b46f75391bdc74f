//! Test helpers for integration tests
//!
//! Builds a client over fresh in-memory backends, with an identity provider
//! wrapper that counts every remote call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use findr_common::{init_telemetry, AppConfig, PasswordService, TracingConfig};
use findr_core::{IdentityProvider, RepoResult, Subscription, UserProfile};
use findr_service::{
    FeedScreen, FeedUpdate, RecordingShell, ServiceContext, ServiceContextBuilder,
};
use findr_store::{
    MemoryDocumentStore, MemoryIdentityProvider, MemoryMediaLibrary, StoreCommentRepository,
    StoreStatusRepository,
};

use crate::fixtures::Credentials;

/// Identity provider that counts remote calls before delegating
pub struct CountingIdentity {
    inner: MemoryIdentityProvider,
    calls: AtomicUsize,
}

impl CountingIdentity {
    pub fn new(inner: MemoryIdentityProvider) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Remote calls made so far (listeners and `current_user` excluded)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for CountingIdentity {
    async fn create_account(&self, email: &str, password: &str) -> RepoResult<UserProfile> {
        self.count();
        self.inner.create_account(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> RepoResult<UserProfile> {
        self.count();
        self.inner.sign_in(email, password).await
    }

    async fn sign_out(&self) -> RepoResult<()> {
        self.count();
        self.inner.sign_out().await
    }

    async fn update_profile(&self, display_name: &str) -> RepoResult<UserProfile> {
        self.count();
        self.inner.update_profile(display_name).await
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.inner.current_user()
    }

    fn watch_session(&self) -> Subscription<Option<UserProfile>> {
        self.inner.watch_session()
    }
}

/// A client wired to fresh in-memory backends
pub struct TestApp {
    pub config: AppConfig,
    pub store: MemoryDocumentStore,
    pub identity: MemoryIdentityProvider,
    pub identity_calls: Arc<CountingIdentity>,
    pub media: MemoryMediaLibrary,
    pub shell: RecordingShell,
    ctx: ServiceContext,
}

impl TestApp {
    /// Start a client with the default configuration
    pub fn start() -> Result<Self> {
        Self::start_with_config(test_config())
    }

    /// Start a client with custom config
    pub fn start_with_config(config: AppConfig) -> Result<Self> {
        init_test_tracing();

        let store = MemoryDocumentStore::new(config.snowflake.worker_id);
        let identity = MemoryIdentityProvider::with_password_service(
            config.identity.min_password_length,
            PasswordService::with_costs(1024, 1)?,
        );
        let identity_calls = Arc::new(CountingIdentity::new(identity.clone()));
        let media = MemoryMediaLibrary::default();
        let shell = RecordingShell::new();

        let ctx = ServiceContextBuilder::new()
            .status_repo(Arc::new(StoreStatusRepository::new(
                store.clone(),
                config.store.statuses_collection.clone(),
            )))
            .comment_repo(Arc::new(StoreCommentRepository::new(
                store.clone(),
                config.store.comments_collection.clone(),
            )))
            .identity(identity_calls.clone())
            .media(Arc::new(media.clone()))
            .shell(Arc::new(shell.clone()))
            .build()?;

        Ok(Self {
            config,
            store,
            identity,
            identity_calls,
            media,
            shell,
            ctx,
        })
    }

    pub fn ctx(&self) -> ServiceContext {
        self.ctx.clone()
    }

    pub fn statuses(&self) -> &str {
        &self.config.store.statuses_collection
    }

    pub fn comments(&self) -> &str {
        &self.config.store.comments_collection
    }

    /// Mount a feed screen and apply its first delivery
    pub async fn feed(&self) -> FeedScreen {
        let mut feed = FeedScreen::mount(self.ctx());
        let first = feed.next_update().await;
        assert!(
            matches!(first, Some(FeedUpdate::Posts { .. })),
            "unexpected first feed delivery: {first:?}"
        );
        feed
    }

    /// Create an account, then sign out
    pub async fn register(&self, credentials: &Credentials) -> Result<UserProfile> {
        let user = self
            .identity
            .create_account(&credentials.email, &credentials.password)
            .await?;
        self.identity.sign_out().await?;
        Ok(user)
    }
}

/// Default configuration for tests
pub fn test_config() -> AppConfig {
    AppConfig::default()
}

/// Install a quiet subscriber once per test binary
pub fn init_test_tracing() {
    let _ = init_telemetry(&TracingConfig::quiet());
}
