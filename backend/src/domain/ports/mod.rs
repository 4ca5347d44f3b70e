//! Domain ports and their fixture/in-memory implementations.
//!
//! Ports are the trait seams between the domain and its adapters. Each port
//! module also carries a lightweight implementation suitable for tests and
//! database-less development runs.

pub mod city_repository;
pub mod in_memory;
pub mod login_service;
pub mod mail_service;
pub mod token_service;

pub use self::city_repository::{
    ChangeSet, CityFilter, CityRepository, CityRepositoryError, CommitOutcome, StagedChange,
};
pub use self::in_memory::InMemoryCityRepository;
pub use self::login_service::{FixtureLoginService, LoginService};
pub use self::mail_service::{LocalMailService, MailService};
pub use self::token_service::{
    FixtureTokenService, TOKEN_VALIDITY_SECS, TokenClaims, TokenService,
};

#[cfg(test)]
pub use self::city_repository::MockCityRepository;
#[cfg(test)]
pub use self::login_service::MockLoginService;
#[cfg(test)]
pub use self::mail_service::MockMailService;
#[cfg(test)]
pub use self::token_service::MockTokenService;
