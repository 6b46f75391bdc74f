//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::DocumentId;

/// Domain layer errors
///
/// Messages are shown to the user verbatim, so they read as sentences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("No document to update: {collection}/{id}")]
    DocumentNotFound { collection: String, id: DocumentId },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Identity Provider Errors
    // =========================================================================
    #[error("The email address is badly formatted. (auth/invalid-email)")]
    InvalidEmail,

    #[error("Password should be at least {min} characters. (auth/weak-password)")]
    WeakPassword { min: usize },

    #[error("The email address is already in use by another account. (auth/email-already-in-use)")]
    EmailAlreadyInUse,

    #[error("The email or password is incorrect. (auth/invalid-credential)")]
    InvalidCredential,

    #[error("No user is currently signed in. (auth/no-current-user)")]
    NoCurrentUser,

    // =========================================================================
    // Permission Errors
    // =========================================================================
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed document {collection}/{id}: {reason}")]
    MalformedDocument {
        collection: String,
        id: DocumentId,
        reason: String,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Create a not found error for a document
    pub fn document_not_found(collection: impl Into<String>, id: DocumentId) -> Self {
        Self::DocumentNotFound {
            collection: collection.into(),
            id,
        }
    }

    /// Create a malformed-document error
    pub fn malformed(collection: impl Into<String>, id: DocumentId, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            collection: collection.into(),
            id,
            reason: reason.into(),
        }
    }

    /// Get an error code string for logs and alerts
    pub fn code(&self) -> &'static str {
        match self {
            Self::DocumentNotFound { .. } => "NOT_FOUND",

            Self::EmptyText => "EMPTY_TEXT",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword { .. } => "WEAK_PASSWORD",
            Self::EmailAlreadyInUse => "EMAIL_ALREADY_IN_USE",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::NoCurrentUser => "NO_CURRENT_USER",

            Self::PermissionDenied(_) => "PERMISSION_DENIED",

            Self::Unavailable(_) => "UNAVAILABLE",
            Self::MalformedDocument { .. } => "MALFORMED_DOCUMENT",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound { .. })
    }

    /// Errors raised locally before any remote call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::PasswordMismatch | Self::ValidationError(_)
        )
    }

    /// Rejections reported by the identity provider
    pub fn is_identity(&self) -> bool {
        matches!(
            self,
            Self::InvalidEmail
                | Self::WeakPassword { .. }
                | Self::EmailAlreadyInUse
                | Self::InvalidCredential
                | Self::NoCurrentUser
        )
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}
