//! Server assembly: configuration and port wiring.

pub mod config;

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    CityRepository, FixtureLoginService, InMemoryCityRepository, LocalMailService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, DieselCityRepository, PoolConfig, PoolError};
use crate::outbound::token::JwtTokenService;

pub use config::ServerConfig;

/// Wire port implementations for the configured environment.
///
/// A configured database URL selects the Diesel adapter; otherwise the
/// in-memory sample store backs the API so the server runs without any
/// external dependency.
///
/// # Errors
///
/// Returns [`PoolError`] when the connection pool cannot be built.
pub async fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, PoolError> {
    let repository: Arc<dyn CityRepository> = match config.database_url() {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url)).await?;
            info!("using the PostgreSQL city store");
            Arc::new(DieselCityRepository::new(pool))
        }
        None => {
            warn!("no database configured; using the in-memory sample store");
            Arc::new(InMemoryCityRepository::with_sample_data())
        }
    };

    Ok(HttpState::new(
        repository,
        Arc::new(FixtureLoginService),
        Arc::new(JwtTokenService::new(config.token_settings(), clock)),
        Arc::new(LocalMailService::new()),
    ))
}
