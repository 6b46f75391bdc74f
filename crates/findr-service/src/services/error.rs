//! Errors returned by screen actions
//!
//! Every error a screen reports is also shown to the user as an [`Alert`];
//! [`ServiceError::to_alert`] decides what that alert says.

use findr_common::AppError;
use findr_core::DomainError;

use crate::shell::Alert;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Rejected by a hosted service, or a domain rule
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input refused locally, before any remote call
    #[error("{0}")]
    Validation(String),

    /// The user refused a device permission
    #[error("Permission to access {permission} is required!")]
    PermissionDenied { permission: String },

    /// A context was built without one of its backends
    #[error("Service context is missing {0}")]
    MissingDependency(&'static str),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied {
            permission: permission.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::MissingDependency(_) => "MISSING_DEPENDENCY",
        }
    }

    pub fn alert_title(&self) -> &'static str {
        match self {
            Self::Domain(e) if e.is_validation() => "Invalid",
            Self::Validation(_) => "Invalid",
            Self::Domain(e) if e.is_permission() => "Permission required",
            Self::PermissionDenied { .. } => "Permission required",
            _ => "Error",
        }
    }

    /// Alert with the default title; the message is the error text as is
    pub fn to_alert(&self) -> Alert {
        Alert::new(self.alert_title(), self.to_string())
    }

    pub fn to_alert_titled(&self, title: &str) -> Alert {
        Alert::new(title, self.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::PermissionDenied { permission } => {
                AppError::Domain(DomainError::PermissionDenied(permission))
            }
            ServiceError::MissingDependency(name) => {
                AppError::Startup(format!("Service context is missing {name}"))
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
