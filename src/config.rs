//! Server configuration loaded from the process environment.
//!
//! The listen port is mandatory (`TELEPATHY_SVC_PORT`); the host is optional
//! (`TELEPATHY_SVC_HOST`, default `0.0.0.0`). A `.env` file is honoured by the
//! binary before this module reads anything.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use std::time::Duration;

/// Environment variable holding the listen port
pub const PORT_ENV: &str = "TELEPATHY_SVC_PORT";

/// Environment variable overriding the listen host
pub const HOST_ENV: &str = "TELEPATHY_SVC_HOST";

/// How long in-flight calls get to finish once shutdown begins
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub grace_period: Duration,
}

impl ServerConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            host,
            port,
            grace_period: SHUTDOWN_GRACE_PERIOD,
        }
    }

    /// Loopback config on an ephemeral port
    pub fn local() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_port = lookup(PORT_ENV).ok_or(ConfigError::MissingPort)?;
        let port = raw_port
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort {
                value: raw_port.clone(),
                source,
            })?;

        let host = match lookup(HOST_ENV) {
            Some(raw_host) => raw_host
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(raw_host.clone()))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        Ok(Self::new(host, port))
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TELEPATHY_SVC_PORT is not set")]
    MissingPort,

    #[error("TELEPATHY_SVC_PORT must be a port number, got '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("TELEPATHY_SVC_HOST must be an IP address, got '{0}'")]
    InvalidHost(String),
}
