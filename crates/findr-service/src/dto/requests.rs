//! Form DTOs submitted by the auth screens
//!
//! Only the checks the client performs itself live here; email format and
//! password strength are judged by the identity provider.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Sign-in form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Sign-up form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignUpRequest {
    pub email: String,

    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
}
