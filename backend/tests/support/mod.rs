//! Shared helpers for API integration tests.
//!
//! Each test binary compiles this module independently; not every binary
//! uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{App, web};

use backend::domain::ports::{
    CityRepository, FixtureLoginService, FixtureTokenService, InMemoryCityRepository,
    LocalMailService, TokenService,
};
use backend::inbound::http::configure_api;
use backend::inbound::http::state::HttpState;

/// Authorization header value accepted by the fixture token service.
pub const FIXTURE_TOKEN: &str = "Bearer fixture.1.ada";

/// State backed by the seeded in-memory store and fixture services.
pub fn sample_state() -> web::Data<HttpState> {
    state_with_repository(Arc::new(InMemoryCityRepository::with_sample_data()))
}

/// State over a caller-supplied repository with fixture services.
pub fn state_with_repository(repository: Arc<dyn CityRepository>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        repository,
        Arc::new(FixtureLoginService),
        Arc::new(FixtureTokenService),
        Arc::new(LocalMailService::new()),
    ))
}

/// State over the sample store with a caller-supplied token service.
pub fn state_with_tokens(tokens: Arc<dyn TokenService>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(InMemoryCityRepository::with_sample_data()),
        Arc::new(FixtureLoginService),
        tokens,
        Arc::new(LocalMailService::new()),
    ))
}

/// Application serving every `/api` route over the given state.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).configure(configure_api)
}
