//! Bearer-token extraction for protected endpoints.
//!
//! Handlers that require authentication take a [`BearerIdentity`] argument;
//! extraction fails with `401 Unauthorized` before the handler body runs
//! when the `Authorization` header is missing, malformed, or carries a
//! token that does not verify.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::Error;
use crate::domain::ports::TokenClaims;
use crate::inbound::http::state::HttpState;

/// Verified claims of the requesting user.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    claims: TokenClaims,
}

impl BearerIdentity {
    /// Claims carried by the verified token.
    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))
}

fn verify_request(req: &HttpRequest) -> Result<BearerIdentity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state missing from app data"))?;
    let token = bearer_token(req)?;
    let claims = state.tokens.verify(token)?;
    Ok(BearerIdentity { claims })
}

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify_request(req))
    }
}
