//! Server configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Command-line flags are applied last by the binary.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Default `EnvFilter` directive
pub const DEFAULT_LOG_FILTER: &str = "info,roster=debug";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: SocketAddr,

    /// Include error chain and backtrace in 500 bodies.
    /// Leaks internals to clients; meant for debugging and compatibility tests.
    pub expose_error_detail: bool,

    /// Tracing filter directive
    pub log_filter: String,

    /// Export traces over OTLP
    pub otel_enabled: bool,

    /// Service name reported to OpenTelemetry
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            expose_error_detail: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            otel_enabled: false,
            service_name: "roster-server".to_string(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        toml::from_str(input).context("Failed to parse server configuration")
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Defaults or the given file, overridden by the process environment
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from environment-style variables.
    ///
    /// `BIND_ADDRESS` sets the listener, `DEBUG` (any value) enables error
    /// detail, `OTEL_ENABLED` toggles OTLP export and `RUST_LOG` replaces the
    /// log filter.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BIND_ADDRESS") {
            self.bind_address = addr
                .parse()
                .with_context(|| format!("Invalid BIND_ADDRESS '{}'", addr))?;
        }

        if lookup("DEBUG").is_some() {
            self.expose_error_detail = true;
        }

        if let Some(enabled) = lookup("OTEL_ENABLED") {
            self.otel_enabled = enabled.parse::<bool>().unwrap_or(false);
        }

        if let Some(filter) = lookup("RUST_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }
}
