//! In-process email/password identity provider
//!
//! Accounts are keyed by lower-cased email and hold an Argon2 hash of the
//! password. Session changes (sign-in, account creation, sign-out) are
//! pushed to every registered session listener.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use findr_common::{AppError, PasswordService};
use findr_core::{DomainError, IdentityProvider, RepoResult, Subscription, UserProfile};

type SessionDelivery = RepoResult<Option<UserProfile>>;

/// Email format check, same rule the hosted provider applies
#[derive(Debug, Validate)]
struct EmailAddress {
    #[validate(email)]
    value: String,
}

struct Account {
    profile: UserProfile,
    password_hash: String,
}

#[derive(Default)]
struct IdentityState {
    accounts: HashMap<String, Account>,
    /// Account key of the signed-in user
    current: Option<String>,
    watchers: Vec<(u64, mpsc::UnboundedSender<SessionDelivery>)>,
    next_watcher: u64,
}

impl IdentityState {
    fn current_profile(&self) -> Option<UserProfile> {
        self.current
            .as_ref()
            .and_then(|key| self.accounts.get(key))
            .map(|account| account.profile.clone())
    }

    fn set_current(&mut self, key: Option<String>) {
        if self.current == key {
            return;
        }
        self.current = key;
        let session = self.current_profile();
        self.watchers
            .retain(|(_, tx)| tx.unbounded_send(Ok(session.clone())).is_ok());
    }
}

struct ProviderInner {
    state: Mutex<IdentityState>,
    passwords: PasswordService,
    min_password_length: usize,
    available: AtomicBool,
}

/// Identity provider held entirely in memory
///
/// Cloning is cheap; clones share accounts and session.
#[derive(Clone)]
pub struct MemoryIdentityProvider {
    inner: Arc<ProviderInner>,
}

impl MemoryIdentityProvider {
    pub fn new(min_password_length: usize) -> Self {
        Self::with_password_service(min_password_length, PasswordService::new())
    }

    /// Provider storing credentials with a specific hasher
    pub fn with_password_service(min_password_length: usize, passwords: PasswordService) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                state: Mutex::new(IdentityState::default()),
                passwords,
                min_password_length,
                available: AtomicBool::new(true),
            }),
        }
    }

    /// Toggle connectivity; while unavailable every remote call fails
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    pub fn account_count(&self) -> usize {
        self.inner.state.lock().accounts.len()
    }

    pub fn watcher_count(&self) -> usize {
        self.inner.state.lock().watchers.len()
    }

    /// Send `error` to every session watcher and detach them all
    pub fn fail_watchers(&self, error: DomainError) {
        let watchers = std::mem::take(&mut self.inner.state.lock().watchers);
        warn!(count = watchers.len(), error = %error, "Terminating session watchers");
        for (_, tx) in watchers {
            let _ = tx.unbounded_send(Err(error.clone()));
        }
    }

    /// Set the photo URL of an account, as another device would
    pub fn set_photo_url(&self, email: &str, photo_url: Option<String>) -> RepoResult<()> {
        let mut state = self.inner.state.lock();
        let account = state
            .accounts
            .get_mut(&account_key(email))
            .ok_or(DomainError::InvalidCredential)?;
        account.profile.photo_url = photo_url;
        Ok(())
    }

    fn ensure_available(&self) -> RepoResult<()> {
        if self.inner.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::Unavailable(
                "A network error has occurred. (auth/network-request-failed)".to_string(),
            ))
        }
    }

    fn check_credentials(&self, email: &str, password: &str) -> RepoResult<()> {
        EmailAddress {
            value: email.trim().to_string(),
        }
        .validate()
        .map_err(|_| DomainError::InvalidEmail)?;

        if password.chars().count() < self.inner.min_password_length {
            return Err(DomainError::WeakPassword {
                min: self.inner.min_password_length,
            });
        }
        Ok(())
    }
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new(6)
    }
}

fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn into_domain(err: AppError) -> DomainError {
    match err {
        AppError::Domain(e) => e,
        other => DomainError::InternalError(other.to_string()),
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    #[instrument(skip(self, password))]
    async fn create_account(&self, email: &str, password: &str) -> RepoResult<UserProfile> {
        self.ensure_available()?;
        self.check_credentials(email, password)?;

        let key = account_key(email);
        if self.inner.state.lock().accounts.contains_key(&key) {
            return Err(DomainError::EmailAlreadyInUse);
        }

        let password_hash = self.inner.passwords.hash(password).map_err(into_domain)?;
        let profile = UserProfile::new(Uuid::new_v4().to_string(), email.trim());

        let mut state = self.inner.state.lock();
        // Re-check under the lock; hashing ran unlocked
        if state.accounts.contains_key(&key) {
            return Err(DomainError::EmailAlreadyInUse);
        }
        state.accounts.insert(
            key.clone(),
            Account {
                profile: profile.clone(),
                password_hash,
            },
        );
        state.set_current(Some(key));

        info!(uid = %profile.uid, "Account created");
        Ok(profile)
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> RepoResult<UserProfile> {
        self.ensure_available()?;
        EmailAddress {
            value: email.trim().to_string(),
        }
        .validate()
        .map_err(|_| DomainError::InvalidEmail)?;

        let key = account_key(email);
        let password_hash = self
            .inner
            .state
            .lock()
            .accounts
            .get(&key)
            .map(|account| account.password_hash.clone())
            .ok_or(DomainError::InvalidCredential)?;

        self.inner
            .passwords
            .verify_or_error(password, &password_hash)
            .map_err(into_domain)?;

        let mut state = self.inner.state.lock();
        let profile = state
            .accounts
            .get(&key)
            .map(|account| account.profile.clone())
            .ok_or(DomainError::InvalidCredential)?;
        state.set_current(Some(key));

        info!(uid = %profile.uid, "Signed in");
        Ok(profile)
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> RepoResult<()> {
        self.ensure_available()?;
        self.inner.state.lock().set_current(None);
        info!("Signed out");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_profile(&self, display_name: &str) -> RepoResult<UserProfile> {
        self.ensure_available()?;

        let mut state = self.inner.state.lock();
        let key = state.current.clone().ok_or(DomainError::NoCurrentUser)?;
        let account = state
            .accounts
            .get_mut(&key)
            .ok_or(DomainError::NoCurrentUser)?;
        account.profile.display_name = Some(display_name.to_string());

        info!(uid = %account.profile.uid, "Profile updated");
        Ok(account.profile.clone())
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.inner.state.lock().current_profile()
    }

    fn watch_session(&self) -> Subscription<Option<UserProfile>> {
        let (tx, rx) = mpsc::unbounded();
        let watcher_id = {
            let mut state = self.inner.state.lock();
            let watcher_id = state.next_watcher;
            state.next_watcher += 1;
            if tx.unbounded_send(Ok(state.current_profile())).is_err() {
                warn!(watcher_id, "Session watcher closed before registration");
            }
            state.watchers.push((watcher_id, tx));
            watcher_id
        };
        debug!(watcher_id, "Session watcher registered");

        let weak: Weak<ProviderInner> = Arc::downgrade(&self.inner);
        Subscription::new(rx.boxed(), move || {
            if let Some(inner) = weak.upgrade() {
                inner.state.lock().watchers.retain(|(id, _)| *id != watcher_id);
                debug!(watcher_id, "Session watcher released");
            }
        })
    }
}
