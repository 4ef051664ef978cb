//! # Logger
//!
//! Console diagnostics for the scaffolding tools, built on `tracing` and
//! `tracing-subscriber`. Events are written to stderr so that previews printed
//! on stdout stay machine-readable. `RUST_LOG` directives override the
//! configured level.
//!
//! ```rust,ignore
//! let _logger = Logger::builder().name("feature-init").level(LevelFilter::WARN).init()?;
//! ```

use crate::error::{Result, ScaffoldError};
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct LoggerConfig {
    name: String,
    level: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { name: String::new(), level: LevelFilter::WARN }
    }
}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Sets the name reported in the startup event.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::Logger`] for an empty name or if a global
    /// subscriber has already been set.
    pub fn init(self) -> Result<Logger> {
        validate_config(&self.config)?;
        let env_filter =
            EnvFilter::builder().with_default_directive(self.config.level.into()).from_env_lossy();

        let console = layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal());

        tracing_subscriber::registry().with(env_filter).with(console).try_init().map_err(|e| {
            ScaffoldError::Logger { message: format!("Tracing subscriber error: {e}").into() }
        })?;

        tracing::debug!(name = %self.config.name, "Logger initialized");
        Ok(Logger { name: self.config.name })
    }
}

/// A handle to the initialized logging system.
#[derive(Debug)]
pub struct Logger {
    name: String,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] with the default `WARN` level.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn validate_config(config: &LoggerConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(ScaffoldError::Logger { message: "Logger name cannot be empty".into() });
    }
    Ok(())
}
