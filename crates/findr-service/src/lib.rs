//! # findr-service
//!
//! Application layer containing the screen state machines (landing gate,
//! sign-in, sign-up, feed, profile), the navigation shell they drive, and
//! request DTOs.
//!
//! Screens own their live subscriptions and are driven from a single task:
//! user actions are `&mut self` methods, and `next_update().await` applies
//! the next live delivery to local state.

pub mod dto;
pub mod services;
pub mod shell;

pub use services::{
    AuthService, Avatar, Composer, ComposerMode, FeedScreen, FeedUpdate, GateUpdate, IdentityGate,
    ProfileScreen, ProfileSection, ProfileUpdate, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SignInScreen, SignUpScreen, SubscriptionSlot, DEFAULT_AVATAR,
};
pub use shell::{Alert, HomeTab, Navigation, RecordingShell, Route, Shell};
