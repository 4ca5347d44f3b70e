//! Helpers shared by HTTP handler tests.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    CityRepository, FixtureLoginService, FixtureTokenService, InMemoryCityRepository,
    LocalMailService, MailService,
};
use crate::inbound::http::state::HttpState;

/// Authorization header value accepted by [`FixtureTokenService`].
pub(crate) const FIXTURE_TOKEN: &str = "Bearer fixture.1.ada";

fn state_with(
    repository: Arc<dyn CityRepository>,
    mail: Arc<dyn MailService>,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        repository,
        Arc::new(FixtureLoginService),
        Arc::new(FixtureTokenService),
        mail,
    ))
}

/// State backed by the sample in-memory store and fixture services.
pub(crate) fn fixture_state() -> web::Data<HttpState> {
    state_with(
        Arc::new(InMemoryCityRepository::with_sample_data()),
        Arc::new(LocalMailService::new()),
    )
}

/// Fixture state with the repository replaced, e.g. by a mock.
pub(crate) fn state_with_repository(
    repository: Arc<dyn CityRepository>,
) -> web::Data<HttpState> {
    state_with(repository, Arc::new(LocalMailService::new()))
}

/// Fixture state with the mail service replaced, e.g. by a mock.
pub(crate) fn state_with_mail(mail: Arc<dyn MailService>) -> web::Data<HttpState> {
    state_with(Arc::new(InMemoryCityRepository::with_sample_data()), mail)
}
