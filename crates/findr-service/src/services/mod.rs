//! Screen services
//!
//! Each screen is a state object driven by user actions, plus an event pump
//! (`next_update` / `drain`) that applies live deliveries to its state.

pub mod auth;
pub mod context;
pub mod error;
pub mod feed;
pub mod gate;
pub mod profile;
pub mod slot;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all screens for convenience
pub use auth::{AuthService, SignInScreen, SignUpScreen};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::{Composer, ComposerMode, FeedScreen, FeedUpdate};
pub use gate::{GateUpdate, IdentityGate};
pub use profile::{Avatar, ProfileScreen, ProfileSection, ProfileUpdate, DEFAULT_AVATAR};
pub use slot::SubscriptionSlot;
