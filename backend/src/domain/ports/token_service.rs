//! Port for issuing and verifying signed claims tokens.
//!
//! The domain treats the token format as an external collaborator supplying
//! sign/verify primitives; the JWT adapter lives in the outbound layer.
//! Signing and verification are pure CPU work, so the port is synchronous.

use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserProfile};

/// Fixed validity window of an issued token, in seconds.
pub const TOKEN_VALIDITY_SECS: i64 = 60 * 60;

/// Claims embedded in an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the stable user identifier.
    pub sub: String,
    /// Given name of the authenticated user.
    pub given_name: String,
    /// Family name of the authenticated user.
    pub family_name: String,
    /// Tenant city the user belongs to.
    pub city: String,
    /// Issuer of the token.
    pub iss: String,
    /// Intended audience.
    pub aud: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch; always `iat` plus
    /// [`TOKEN_VALIDITY_SECS`].
    pub exp: i64,
}

/// Domain port for minting and checking claims tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Mint a signed token for the given profile, valid for exactly
    /// [`TOKEN_VALIDITY_SECS`] from issuance.
    fn issue(&self, profile: &UserProfile) -> Result<String, Error>;

    /// Verify a presented token and return its claims, or `Unauthorized`
    /// when the signature, expiry, issuer, or audience check fails.
    fn verify(&self, token: &str) -> Result<TokenClaims, Error>;
}

/// Unsigned stand-in token service for handler tests.
///
/// Tokens are the plain string `fixture.<sub>.<given_name>`; anything else
/// fails verification. Never used outside tests and development doubles.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

impl TokenService for FixtureTokenService {
    fn issue(&self, profile: &UserProfile) -> Result<String, Error> {
        Ok(format!("fixture.{}.{}", profile.user_id, profile.given_name))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, Error> {
        let mut parts = token.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("fixture"), Some(sub), Some(given_name)) if !sub.is_empty() => Ok(TokenClaims {
                sub: sub.to_owned(),
                given_name: given_name.to_owned(),
                family_name: "Dockx".to_owned(),
                city: "Antwerp".to_owned(),
                iss: "fixture".to_owned(),
                aud: "fixture".to_owned(),
                iat: 0,
                exp: TOKEN_VALIDITY_SECS,
            }),
            _ => Err(Error::unauthorized("invalid token")),
        }
    }
}
