//! Application state
//!
//! Holds the service context, the configuration and handles on the
//! in-memory backends behind it.

use std::sync::Arc;

use findr_common::{AppConfig, AppError};
use findr_service::{RecordingShell, ServiceContext, ServiceContextBuilder};
use findr_store::{
    MemoryDocumentStore, MemoryIdentityProvider, MemoryMediaLibrary, StoreCommentRepository,
    StoreStatusRepository,
};
use tracing::info;

/// Application state shared by every screen
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: ServiceContext,
    /// Application configuration
    config: Arc<AppConfig>,
    store: MemoryDocumentStore,
    identity: MemoryIdentityProvider,
    media: MemoryMediaLibrary,
    shell: RecordingShell,
}

impl AppState {
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &MemoryDocumentStore {
        &self.store
    }

    pub fn identity(&self) -> &MemoryIdentityProvider {
        &self.identity
    }

    pub fn media(&self) -> &MemoryMediaLibrary {
        &self.media
    }

    pub fn shell(&self) -> &RecordingShell {
        &self.shell
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Initialize all backends and create AppState
pub fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(project_id = %config.store.project_id, "Opening in-memory document store");
    let store = MemoryDocumentStore::new(config.snowflake.worker_id);
    let identity = MemoryIdentityProvider::new(config.identity.min_password_length);
    let media = MemoryMediaLibrary::default();
    let shell = RecordingShell::new();

    // Create repositories
    let status_repo = Arc::new(StoreStatusRepository::new(
        store.clone(),
        config.store.statuses_collection.clone(),
    ));
    let comment_repo = Arc::new(StoreCommentRepository::new(
        store.clone(),
        config.store.comments_collection.clone(),
    ));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .status_repo(status_repo)
        .comment_repo(comment_repo)
        .identity(Arc::new(identity.clone()))
        .media(Arc::new(media.clone()))
        .shell(Arc::new(shell.clone()))
        .build()
        .map_err(|e| AppError::Startup(e.to_string()))?;

    Ok(AppState {
        service_context,
        config: Arc::new(config),
        store,
        identity,
        media,
        shell,
    })
}
