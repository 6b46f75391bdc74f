//! Identity provider port

use async_trait::async_trait;

use super::repositories::RepoResult;
use crate::entities::UserProfile;
use crate::subscription::Subscription;

/// Hosted identity provider (email/password accounts)
///
/// Every failing call reports a `DomainError` whose message is fit to show
/// to the user as-is.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in
    async fn create_account(&self, email: &str, password: &str) -> RepoResult<UserProfile>;

    async fn sign_in(&self, email: &str, password: &str) -> RepoResult<UserProfile>;

    async fn sign_out(&self) -> RepoResult<()>;

    /// Set the display name of the signed-in user
    async fn update_profile(&self, display_name: &str) -> RepoResult<UserProfile>;

    fn current_user(&self) -> Option<UserProfile>;

    /// Session changes; the current state is delivered right away
    fn watch_session(&self) -> Subscription<Option<UserProfile>>;
}
