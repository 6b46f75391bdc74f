//! Data transfer objects for screen forms

pub mod requests;

pub use requests::{SignInRequest, SignUpRequest};
