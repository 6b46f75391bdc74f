//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
    pub snowflake: SnowflakeConfig,
    pub telemetry: TelemetryConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Document store settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default = "default_statuses_collection")]
    pub statuses_collection: String,
    #[serde(default = "default_comments_collection")]
    pub comments_collection: String,
}

/// Identity provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

/// Document id generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Logging output settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_app_name() -> String {
    "findr".to_string()
}

fn default_project_id() -> String {
    "findr-local".to_string()
}

fn default_statuses_collection() -> String {
    "statuses".to_string()
}

fn default_comments_collection() -> String {
    "comments".to_string()
}

fn default_min_password_length() -> usize {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            store: StoreConfig {
                project_id: default_project_id(),
                statuses_collection: default_statuses_collection(),
                comments_collection: default_comments_collection(),
            },
            identity: IdentityConfig {
                min_password_length: default_min_password_length(),
            },
            snowflake: SnowflakeConfig { worker_id: 0 },
            telemetry: TelemetryConfig {
                json: false,
                level: default_log_level(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_or(&lookup, "APP_ENV", Environment::default())?,
            },
            store: StoreConfig {
                project_id: lookup("STORE_PROJECT_ID").unwrap_or_else(default_project_id),
                statuses_collection: lookup("STORE_STATUSES_COLLECTION")
                    .unwrap_or_else(default_statuses_collection),
                comments_collection: lookup("STORE_COMMENTS_COLLECTION")
                    .unwrap_or_else(default_comments_collection),
            },
            identity: IdentityConfig {
                min_password_length: parse_or(
                    &lookup,
                    "IDENTITY_MIN_PASSWORD_LENGTH",
                    default_min_password_length(),
                )?,
            },
            snowflake: SnowflakeConfig {
                worker_id: parse_or(&lookup, "WORKER_ID", 0)?,
            },
            telemetry: TelemetryConfig {
                json: parse_or(&lookup, "LOG_JSON", false)?,
                level: lookup("LOG_LEVEL").unwrap_or_else(default_log_level),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.snowflake.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                format!("{} is not below 1024", self.snowflake.worker_id),
            ));
        }
        if self.store.statuses_collection == self.store.comments_collection {
            return Err(ConfigError::InvalidValue(
                "STORE_COMMENTS_COLLECTION",
                "must differ from the statuses collection".to_string(),
            ));
        }
        if self.identity.min_password_length == 0 {
            return Err(ConfigError::InvalidValue(
                "IDENTITY_MIN_PASSWORD_LENGTH",
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(key, e.to_string())),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
