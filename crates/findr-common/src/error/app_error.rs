//! Errors above the domain layer
//!
//! Domain rejections pass through with their message untouched, since that
//! message is what the user ends up reading in an alert.

use findr_core::DomainError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Something the client expected to see was not there
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backends could not be wired together
    #[error("Startup error: {0}")]
    Startup(String),

    #[error("Internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Domain(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
            Self::Startup(_) => "STARTUP_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Title of the alert that reports this error
    #[must_use]
    pub fn alert_title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid",
            Self::Domain(e) if e.is_validation() => "Invalid",
            Self::Domain(e) if e.is_permission() => "Permission required",
            _ => "Error",
        }
    }

    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
