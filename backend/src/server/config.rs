//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use rideease::domain::BookingPolicy;
use rideease::outbound::persistence::DbPool;
use rideease::outbound::security::TokenSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) policy: BookingPolicy,
    pub(crate) token_secret: TokenSecret,
    pub(crate) token_ttl: chrono::Duration,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret, token_ttl: chrono::Duration) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            policy: BookingPolicy::default(),
            token_secret,
            token_ttl,
        }
    }

    /// Attach a database connection pool. Without one the server keeps all
    /// data in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }
}
