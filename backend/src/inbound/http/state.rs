//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without real infrastructure.

use std::sync::Arc;

use crate::domain::ports::{CityRepository, LoginService, MailService, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// City and point-of-interest storage.
    pub repository: Arc<dyn CityRepository>,
    /// Credential validation.
    pub login: Arc<dyn LoginService>,
    /// Token issuance and verification.
    pub tokens: Arc<dyn TokenService>,
    /// Notification mail delivery.
    pub mail: Arc<dyn MailService>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureLoginService, FixtureTokenService, InMemoryCityRepository, LocalMailService,
    /// };
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryCityRepository::with_sample_data()),
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureTokenService),
    ///     Arc::new(LocalMailService::new()),
    /// );
    /// let _repository = state.repository.clone();
    /// ```
    pub fn new(
        repository: Arc<dyn CityRepository>,
        login: Arc<dyn LoginService>,
        tokens: Arc<dyn TokenService>,
        mail: Arc<dyn MailService>,
    ) -> Self {
        Self {
            repository,
            login,
            tokens,
            mail,
        }
    }
}
