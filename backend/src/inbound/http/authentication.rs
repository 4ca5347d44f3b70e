//! Authentication API handler.
//!
//! ```text
//! POST /api/authentication/authenticate {"username":"ada","password":"secret"}
//! ```
//!
//! Successful authentication returns a signed claims token valid for one
//! hour; credential mismatches yield `401` without a token.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/authentication/authenticate`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRequestBody {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Response body carrying the issued token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticationResponseBody {
    /// Signed compact claims token.
    pub jwt: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Validate credentials and issue a claims token.
#[utoipa::path(
    post,
    path = "/api/authentication/authenticate",
    request_body = AuthenticationRequestBody,
    responses(
        (status = 200, description = "Token issued", body = AuthenticationResponseBody),
        (status = 400, description = "Malformed credentials", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["authentication"],
    operation_id = "authenticate",
    security([])
)]
#[post("/authentication/authenticate")]
pub async fn authenticate(
    state: web::Data<HttpState>,
    payload: web::Json<AuthenticationRequestBody>,
) -> ApiResult<web::Json<AuthenticationResponseBody>> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;

    let profile = state.login.authenticate(&credentials).await?;
    let jwt = state.tokens.issue(&profile)?;
    Ok(web::Json(AuthenticationResponseBody { jwt }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::http::test_utils::fixture_state;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(fixture_state())
            .service(web::scope("/api").service(authenticate))
    }

    #[actix_web::test]
    async fn well_formed_credentials_yield_a_token() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/authentication/authenticate")
                .set_json(AuthenticationRequestBody {
                    username: "ada".into(),
                    password: "secret".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let token = body.get("jwt").and_then(Value::as_str).expect("jwt field");
        assert!(!token.is_empty());
    }

    #[rstest]
    #[case("  ", "secret", "empty_username")]
    #[case("ada", "", "empty_password")]
    #[actix_web::test]
    async fn malformed_credentials_are_rejected_with_details(
        #[case] username: &str,
        #[case] password: &str,
        #[case] code: &str,
    ) {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/authentication/authenticate")
                .set_json(AuthenticationRequestBody {
                    username: username.into(),
                    password: password.into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.pointer("/details/code").and_then(Value::as_str), Some(code));
    }
}
