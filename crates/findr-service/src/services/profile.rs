//! Profile screen
//!
//! Shows the signed-in user, edits the display name, picks a local avatar
//! and hosts the informational sections.

use tracing::{debug, error, info, instrument, warn};

use findr_core::{ImagePickerOptions, NonEmptyText, RepoResult, Subscription, UserProfile};

use crate::shell::{Alert, HomeTab, Route};

use super::auth::AuthService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const EMPTY_NAME: &str = "Name cannot be empty.";
const GALLERY: &str = "gallery";
const NOT_AVAILABLE: &str = "N/A";
const UNNAMED: &str = "Your Name";

/// Bundled image shown when the user has no avatar
pub const DEFAULT_AVATAR: &str = "assets/images/user.png";

/// Informational sections reachable from the profile menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileSection {
    MyProfile,
    Settings,
    Archive,
    Deleted,
    AboutApp,
}

impl ProfileSection {
    /// Menu order
    pub const ALL: [Self; 5] = [
        Self::MyProfile,
        Self::Settings,
        Self::Archive,
        Self::Deleted,
        Self::AboutApp,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::MyProfile => "My Profile",
            Self::Settings => "Settings",
            Self::Archive => "Archive",
            Self::Deleted => "Deleted",
            Self::AboutApp => "About App",
        }
    }
}

/// Where the avatar image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Picked on this device, not uploaded
    Picked(String),
    /// The user's photo URL
    Remote(String),
    Default,
}

impl Avatar {
    pub fn uri(&self) -> &str {
        match self {
            Self::Picked(uri) | Self::Remote(uri) => uri,
            Self::Default => DEFAULT_AVATAR,
        }
    }
}

/// What a session notification did to the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdate {
    User(UserProfile),
    /// No session; the route was replaced with SignIn
    RedirectedToSignIn,
    ListenerFailed(String),
}

/// Profile screen state
pub struct ProfileScreen {
    ctx: ServiceContext,
    session: Option<Subscription<Option<UserProfile>>>,
    user: Option<UserProfile>,
    auth_ready: bool,
    editing: bool,
    name_draft: String,
    saving: bool,
    picked_avatar: Option<String>,
    section: Option<ProfileSection>,
}

impl ProfileScreen {
    /// Mount the screen and start listening for session changes
    pub fn mount(ctx: ServiceContext) -> Self {
        let session = ctx.identity().watch_session();
        debug!("Profile screen mounted");
        Self {
            ctx,
            session: Some(session),
            user: None,
            auth_ready: false,
            editing: false,
            name_draft: String::new(),
            saving: false,
            picked_avatar: None,
            section: None,
        }
    }

    pub fn unmount(&mut self) {
        if let Some(session) = self.session.take() {
            session.unsubscribe();
            debug!("Profile screen unmounted");
        }
    }

    // === State ===

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_auth_ready(&self) -> bool {
        self.auth_ready
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn name_draft(&self) -> &str {
        &self.name_draft
    }

    /// Name shown in the header; a placeholder until one is set
    pub fn header_name(&self) -> &str {
        self.user
            .as_ref()
            .map_or(UNNAMED, |user| user.display_name_or(UNNAMED))
    }

    /// A display-name update is in flight
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Picked image first, then the user's photo, then the bundled default
    pub fn avatar(&self) -> Avatar {
        if let Some(uri) = &self.picked_avatar {
            Avatar::Picked(uri.clone())
        } else if let Some(url) = self.user.as_ref().and_then(|u| u.photo_url.clone()) {
            Avatar::Remote(url)
        } else {
            Avatar::Default
        }
    }

    // === Display name ===

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn set_name_draft(&mut self, name: impl Into<String>) {
        self.name_draft = name.into();
    }

    /// Leave edit mode and restore the draft to the current name
    pub fn cancel_editing(&mut self) {
        self.name_draft = self
            .user
            .as_ref()
            .and_then(|u| u.display_name.clone())
            .unwrap_or_default();
        self.editing = false;
    }

    /// Save the trimmed name draft as the display name
    #[instrument(skip(self))]
    pub async fn save_name(&mut self) -> ServiceResult<()> {
        let Ok(name) = NonEmptyText::parse(&self.name_draft) else {
            let err = ServiceError::validation(EMPTY_NAME);
            self.ctx.shell().alert(err.to_alert());
            return Err(err);
        };

        self.saving = true;
        let result = self.ctx.identity().update_profile(name.as_str()).await;
        self.saving = false;

        match result {
            Ok(user) => {
                info!(uid = %user.uid, "Display name updated");
                self.user = Some(user);
                self.editing = false;
                self.ctx
                    .shell()
                    .alert(Alert::new("Success", "Username updated."));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Display name update failed");
                let err = ServiceError::from(e);
                self.ctx.shell().alert(err.to_alert_titled("Error"));
                Err(err)
            }
        }
    }

    // === Avatar ===

    /// Let the user pick a square avatar from the gallery; it stays local
    #[instrument(skip(self))]
    pub async fn pick_avatar(&mut self) -> ServiceResult<Option<String>> {
        if !self.ctx.media().request_permission().await {
            warn!("Gallery permission refused");
            let err = ServiceError::permission_denied(GALLERY);
            self.ctx.shell().alert(err.to_alert());
            return Err(err);
        }

        match self
            .ctx
            .media()
            .pick_image(&ImagePickerOptions::avatar())
            .await
        {
            Ok(Some(uri)) => {
                debug!(uri = %uri, "Avatar picked");
                self.picked_avatar = Some(uri.clone());
                Ok(Some(uri))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                let err = ServiceError::from(e);
                self.ctx.shell().alert(err.to_alert());
                Err(err)
            }
        }
    }

    // === Sections ===

    pub fn section(&self) -> Option<ProfileSection> {
        self.section
    }

    pub fn open_section(&mut self, section: ProfileSection) {
        self.section = Some(section);
    }

    /// Back to the section menu
    pub fn back(&mut self) {
        self.section = None;
    }

    /// Title and body lines of a section
    pub fn section_content(&self, section: ProfileSection) -> (&'static str, Vec<String>) {
        let lines = match section {
            ProfileSection::MyProfile => {
                let name = self
                    .user
                    .as_ref()
                    .and_then(|u| u.display_name.as_deref())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(NOT_AVAILABLE);
                let email = self
                    .user
                    .as_ref()
                    .map(|u| u.email.as_str())
                    .filter(|email| !email.is_empty())
                    .unwrap_or(NOT_AVAILABLE);
                vec![format!("Name: {name}"), format!("Email: {email}")]
            }
            ProfileSection::Settings => vec!["This is your settings page.".to_string()],
            ProfileSection::Archive => vec!["Archived content goes here.".to_string()],
            ProfileSection::Deleted => vec!["Deleted items content goes here.".to_string()],
            ProfileSection::AboutApp => {
                vec!["This app is developed for travel journeys and much more.".to_string()]
            }
        };
        (section.title(), lines)
    }

    // === Tabs ===

    /// Tab bar press; this screen is the Profile tab
    pub fn select_tab(&self, tab: HomeTab) -> bool {
        tab.press(HomeTab::Profile, self.ctx.shell())
    }

    // === Session ===

    pub async fn sign_out(&mut self) {
        AuthService::new(&self.ctx).sign_out().await;
    }

    /// Wait for the next session notification and apply it
    pub async fn next_update(&mut self) -> Option<ProfileUpdate> {
        let delivery = self.session.as_mut()?.next().await;
        self.apply(delivery)
    }

    /// Apply every notification already queued
    pub fn drain(&mut self) -> Vec<ProfileUpdate> {
        let mut updates = Vec::new();
        while let Some(delivery) = self.session.as_mut().and_then(Subscription::next_ready) {
            updates.extend(self.apply(delivery));
        }
        updates
    }

    fn apply(&mut self, delivery: Option<RepoResult<Option<UserProfile>>>) -> Option<ProfileUpdate> {
        match delivery {
            Some(Ok(user)) => {
                self.auth_ready = true;
                if let Some(name) = user.as_ref().and_then(|u| u.display_name.clone()) {
                    self.name_draft = name;
                }
                self.user = user.clone();
                match user {
                    Some(user) => Some(ProfileUpdate::User(user)),
                    None => {
                        info!("No session, redirecting to sign-in");
                        self.ctx.shell().replace(Route::SignIn);
                        Some(ProfileUpdate::RedirectedToSignIn)
                    }
                }
            }
            Some(Err(e)) => {
                warn!(error = %e, "Session listener failed");
                Some(ProfileUpdate::ListenerFailed(e.to_string()))
            }
            None => {
                self.session = None;
                None
            }
        }
    }
}

impl Drop for ProfileScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}
