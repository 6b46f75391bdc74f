//! Landing identity gate
//!
//! Watches the session while the landing screen is mounted: a signed-in
//! session goes straight to the profile, otherwise the landing content is
//! revealed.

use tracing::{debug, info, warn};

use findr_core::{RepoResult, Subscription, UserProfile};

use crate::shell::Route;

use super::context::ServiceContext;

/// What a session delivery did to the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateUpdate {
    /// A session is present; the route was replaced with Profile
    RedirectedToProfile,
    /// No session; landing content is shown
    ShowLanding,
    /// The session listener failed
    ListenerFailed(String),
}

/// Landing screen state
pub struct IdentityGate {
    ctx: ServiceContext,
    session: Option<Subscription<Option<UserProfile>>>,
    checking: bool,
}

impl IdentityGate {
    /// Mount the gate and start listening for session changes
    pub fn mount(ctx: ServiceContext) -> Self {
        let session = ctx.identity().watch_session();
        debug!("Identity gate mounted");
        Self {
            ctx,
            session: Some(session),
            checking: true,
        }
    }

    /// Still waiting for the first session notification
    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    /// "Get started" button
    pub fn get_started(&self) {
        self.ctx.shell().push(Route::SignIn);
    }

    /// Wait for the next session notification and apply it
    pub async fn next_update(&mut self) -> Option<GateUpdate> {
        let delivery = self.session.as_mut()?.next().await;
        self.apply(delivery)
    }

    /// Apply every notification already queued
    pub fn drain(&mut self) -> Vec<GateUpdate> {
        let mut updates = Vec::new();
        while let Some(delivery) = self.session.as_mut().and_then(Subscription::next_ready) {
            updates.extend(self.apply(delivery));
        }
        updates
    }

    /// Stop listening
    pub fn unmount(&mut self) {
        if let Some(session) = self.session.take() {
            session.unsubscribe();
            debug!("Identity gate unmounted");
        }
    }

    fn apply(&mut self, delivery: Option<RepoResult<Option<UserProfile>>>) -> Option<GateUpdate> {
        match delivery {
            Some(Ok(Some(user))) => {
                info!(uid = %user.uid, "Session present, opening profile");
                self.ctx.shell().replace(Route::Profile);
                Some(GateUpdate::RedirectedToProfile)
            }
            Some(Ok(None)) => {
                self.checking = false;
                Some(GateUpdate::ShowLanding)
            }
            Some(Err(e)) => {
                warn!(error = %e, "Session listener failed");
                self.checking = false;
                Some(GateUpdate::ListenerFailed(e.to_string()))
            }
            None => {
                self.session = None;
                None
            }
        }
    }
}

impl Drop for IdentityGate {
    fn drop(&mut self) {
        self.unmount();
    }
}
