//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use loan_desk::outbound::persistence::DbPool;
use loan_desk::settings::DEFAULT_CASH_RECEIVED_OFFSET;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cash_received_offset: f64,
}

impl ServerConfig {
    /// Configuration binding `bind_addr` with no database and the default
    /// cash-received offset.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            cash_received_offset: DEFAULT_CASH_RECEIVED_OFFSET,
        }
    }

    /// Attach a database connection pool; without one loans are kept in
    /// memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the dashboard's cash-received offset.
    #[must_use]
    pub fn with_cash_received_offset(mut self, offset: f64) -> Self {
        self.cash_received_offset = offset;
        self
    }
}
