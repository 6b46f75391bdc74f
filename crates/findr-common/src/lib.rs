//! # findr-common
//!
//! Shared utilities including configuration, error handling, password hashing,
//! and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::PasswordService;
pub use config::{
    AppConfig, AppSettings, ConfigError, Environment, IdentityConfig, SnowflakeConfig,
    StoreConfig, TelemetryConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_telemetry, LogFormat, TracingConfig, TracingError};
