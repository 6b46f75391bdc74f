//! # findr-app
//!
//! Client wiring: builds the service context over the in-memory backends
//! and drives a scripted session through every screen.

pub mod session;
pub mod state;

pub use session::{run_session, SessionReport};
pub use state::{create_app_state, AppState};
