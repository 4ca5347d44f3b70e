//! Driving port for credential validation.
//!
//! Inbound adapters call this port to turn credentials into an identity
//! profile without knowing the backing identity store. HTTP handler tests
//! substitute a test double instead of wiring real infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserProfile};

/// Domain use-case port for credential validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated profile, or
    /// `Unauthorized` when they do not identify anyone.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error>;
}

/// Placeholder credential check used until a real identity store is wired.
///
/// Accepts every well-formed credential pair and returns a fixed profile
/// with the supplied username as the given name. This is not a security
/// mechanism; a production deployment must replace it with a real lookup
/// and password-hash comparison.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error> {
        Ok(UserProfile {
            user_id: 1,
            given_name: credentials.username().to_owned(),
            family_name: "Dockx".to_owned(),
            city: "Antwerp".to_owned(),
        })
    }
}
