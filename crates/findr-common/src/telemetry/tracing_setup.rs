//! Log subscriber setup
//!
//! `RUST_LOG` wins over the configured level when it is set.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{Environment, TelemetryConfig};

/// Line format of the log output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, one event per line
    Pretty,
    /// One JSON object per event
    Json,
}

/// Subscriber options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Log span open/close, which traces every screen action
    pub span_events: bool,
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            span_events: false,
            file_line: true,
        }
    }
}

impl TracingConfig {
    /// Preset for the environment, then the telemetry section on top
    ///
    /// An unparsable level keeps the preset.
    #[must_use]
    pub fn for_environment(env: Environment, telemetry: &TelemetryConfig) -> Self {
        let mut config = if env.is_production() {
            Self {
                format: LogFormat::Json,
                file_line: false,
                ..Self::default()
            }
        } else {
            Self {
                level: Level::DEBUG,
                span_events: true,
                ..Self::default()
            }
        };
        if telemetry.json {
            config.format = LogFormat::Json;
        }
        if let Ok(level) = telemetry.level.parse::<Level>() {
            config.level = level;
        }
        config
    }

    /// Quiet preset for test binaries
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            level: Level::WARN,
            file_line: false,
            ..Self::default()
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
    }
}

/// Install the global subscriber
///
/// Only the first call in a process succeeds; later calls report
/// [`TracingError::AlreadyInitialized`] and leave the first subscriber in
/// place.
pub fn init_telemetry(config: &TracingConfig) -> Result<(), TracingError> {
    let spans = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let layer = fmt::layer()
        .with_file(config.file_line)
        .with_line_number(config.file_line)
        .with_span_events(spans);
    let registry = tracing_subscriber::registry().with(config.filter());

    let installed = match config.format {
        LogFormat::Pretty => registry.with(layer).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
    installed.map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
