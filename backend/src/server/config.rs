//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use roster::middleware::RateLimitConfig;
use roster::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) rate_limit: RateLimitConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, rate_limit: RateLimitConfig) -> Self {
        Self {
            bind_addr,
            rate_limit,
            db_pool: None,
        }
    }

    /// Attach a database connection pool so the roster is kept in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
