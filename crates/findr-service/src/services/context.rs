//! Service context - dependency container for screens
//!
//! Holds the ports to the hosted services and the navigation shell.

use std::sync::Arc;

use findr_core::{CommentRepository, IdentityProvider, MediaLibrary, StatusRepository};

use crate::shell::Shell;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Every screen holds a clone. It provides access to:
/// - Status and comment repositories (document store)
/// - The identity provider
/// - The device media library
/// - The navigation shell
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    status_repo: Arc<dyn StatusRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Hosted services
    identity: Arc<dyn IdentityProvider>,
    media: Arc<dyn MediaLibrary>,

    // Host
    shell: Arc<dyn Shell>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        status_repo: Arc<dyn StatusRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        identity: Arc<dyn IdentityProvider>,
        media: Arc<dyn MediaLibrary>,
        shell: Arc<dyn Shell>,
    ) -> Self {
        Self {
            status_repo,
            comment_repo,
            identity,
            media,
            shell,
        }
    }

    // === Repositories ===

    pub fn status_repo(&self) -> &dyn StatusRepository {
        self.status_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    // === Hosted services ===

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn media(&self) -> &dyn MediaLibrary {
        self.media.as_ref()
    }

    // === Host ===

    pub fn shell(&self) -> &dyn Shell {
        self.shell.as_ref()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    status_repo: Option<Arc<dyn StatusRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    media: Option<Arc<dyn MediaLibrary>>,
    shell: Option<Arc<dyn Shell>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_repo(mut self, repo: Arc<dyn StatusRepository>) -> Self {
        self.status_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn media(mut self, media: Arc<dyn MediaLibrary>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn shell(mut self, shell: Arc<dyn Shell>) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Build the ServiceContext
    ///
    /// Returns an error if any dependency is missing.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.status_repo.ok_or(ServiceError::MissingDependency("status_repo"))?,
            self.comment_repo.ok_or(ServiceError::MissingDependency("comment_repo"))?,
            self.identity.ok_or(ServiceError::MissingDependency("identity"))?,
            self.media.ok_or(ServiceError::MissingDependency("media"))?,
            self.shell.ok_or(ServiceError::MissingDependency("shell"))?,
        ))
    }
}
