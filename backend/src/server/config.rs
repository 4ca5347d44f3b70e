//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::outbound::token::TokenSettings;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    token_settings: TokenSettings,
    database_url: Option<String>,
}

impl ServerConfig {
    /// Construct a server configuration from the bind address and token
    /// signing settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_settings: TokenSettings) -> Self {
        Self {
            bind_addr,
            token_settings,
            database_url: None,
        }
    }

    /// Attach a PostgreSQL connection URL.
    ///
    /// When absent, the server falls back to the in-memory sample store.
    #[must_use]
    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Token signing settings.
    #[must_use]
    pub fn token_settings(&self) -> &TokenSettings {
        &self.token_settings
    }

    /// Configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}
