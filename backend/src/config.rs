//! Server configuration.
//!
//! Values are resolved in three layers, later ones winning:
//!
//! 1. Built-in defaults (`0.0.0.0:3000`, 10 MiB uploads)
//! 2. Environment (`BECU_HOST`, `BECU_PORT`, `BECU_MAX_UPLOAD_BYTES`),
//!    optionally loaded from a `.env` file
//! 3. Command-line flags

use std::net::{IpAddr, SocketAddr};

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const HOST_VAR: &str = "BECU_HOST";
const PORT_VAR: &str = "BECU_PORT";
const MAX_UPLOAD_VAR: &str = "BECU_MAX_UPLOAD_BYTES";

/// Settings for the HTTP boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by the process environment (and `.env`, if present).
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = parse_value(PORT_VAR, &port)?;
        }
        if let Some(limit) = lookup(MAX_UPLOAD_VAR) {
            config.max_upload_bytes = parse_value(MAX_UPLOAD_VAR, &limit)?;
        }

        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Address to bind the listener to.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> ConfigResult<T> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
