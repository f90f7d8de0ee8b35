//! Service configuration loaded via OrthoConfig.
//!
//! Values resolve from CLI flags, then `LOAN_DESK_*` environment variables,
//! then a configuration file, then the defaults below.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
/// Fixed amount added to the cash-received placeholder figure.
pub const DEFAULT_CASH_RECEIVED_OFFSET: f64 = 500_000.0;

/// Problems found while validating loaded settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// The bind host is not an IP address.
    #[error("bind host `{host}` is not a valid IP address")]
    InvalidHost { host: String },
    /// Port zero would bind a random port.
    #[error("port must be between 1 and 65535")]
    ZeroPort,
    /// A pool needs at least one connection.
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
    /// The cash-received offset must be a finite number.
    #[error("cash_received_offset must be finite, got {value}")]
    NonFiniteOffset { value: f64 },
}

/// Configuration values for the loan desk server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOAN_DESK")]
pub struct AppSettings {
    /// Interface to bind; defaults to all interfaces.
    pub bind_host: Option<String>,
    /// TCP port to listen on.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// PostgreSQL connection URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Offset added to the dashboard's cash-received placeholder.
    #[ortho_config(default = 500_000.0)]
    pub cash_received_offset: f64,
}

impl AppSettings {
    /// Configured bind host, falling back to all interfaces.
    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    /// Configured port; 5000 unless overridden.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Configured pool size; 10 unless overridden.
    pub const fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    /// Configured cash-received offset; [`DEFAULT_CASH_RECEIVED_OFFSET`]
    /// unless overridden.
    pub const fn cash_received_offset(&self) -> f64 {
        self.cash_received_offset
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Socket address built from host and port.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when the host does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.bind_host();
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Check every value before the server starts.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.port() == 0 {
            return Err(SettingsError::ZeroPort);
        }
        if self.db_max_connections() == 0 {
            return Err(SettingsError::ZeroConnections);
        }
        let offset = self.cash_received_offset();
        if !offset.is_finite() {
            return Err(SettingsError::NonFiniteOffset { value: offset });
        }
        self.bind_addr().map(|_| ())
    }
}
