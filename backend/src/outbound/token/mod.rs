//! JWT implementation of the token service port.
//!
//! Tokens are HS256-signed compact JWTs over a shared secret supplied via
//! configuration. The secret is wrapped in a zeroize-on-drop container and
//! is never logged. Verification enforces signature, expiry, issuer, and
//! audience.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use tracing::error;
use zeroize::Zeroizing;

use crate::domain::ports::{TOKEN_VALIDITY_SECS, TokenClaims, TokenService};
use crate::domain::{Error, UserProfile};

/// Signing configuration for [`JwtTokenService`].
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    issuer: String,
    audience: String,
}

impl TokenSettings {
    /// Bundle the shared secret with the issuer and audience claims.
    pub fn new(secret: Vec<u8>, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Issuer claim stamped into tokens.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Audience claim stamped into tokens.
    pub fn audience(&self) -> &str {
        &self.audience
    }
}

// Keep key material out of debug output.
impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// HS256 JWT issuer and verifier.
///
/// Time comes from an injected [`Clock`] so issuance is deterministic under
/// test; expiry verification uses the JWT library's own clock.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service from signing settings and a time source.
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.secret()),
            decoding: DecodingKey::from_secret(settings.secret()),
            issuer: settings.issuer().to_owned(),
            audience: settings.audience().to_owned(),
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, profile: &UserProfile) -> Result<String, Error> {
        let issued_at = self.clock.utc().timestamp();
        let claims = TokenClaims {
            sub: profile.user_id.to_string(),
            given_name: profile.given_name.clone(),
            family_name: profile.family_name.clone(),
            city: profile.city.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at,
            exp: issued_at + TOKEN_VALIDITY_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
            error!(error = %err, "token signing failed");
            Error::internal("token signing failed")
        })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);

        decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| Error::unauthorized("invalid or expired token"))
    }
}
