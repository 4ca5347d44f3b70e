//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! HTTP endpoint from the inbound layer, the shared schema types, and the
//! bearer-token security scheme. Swagger UI serves the document in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/authentication/authenticate.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "City guide backend API",
        description = "HTTP interface for cities, their points of interest, and token-based authentication."
    ),
    paths(
        crate::inbound::http::authentication::authenticate,
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::get_city,
        crate::inbound::http::points_of_interest::list_points_of_interest,
        crate::inbound::http::points_of_interest::get_point_of_interest,
        crate::inbound::http::points_of_interest::create_point_of_interest,
        crate::inbound::http::points_of_interest::update_point_of_interest,
        crate::inbound::http::points_of_interest::partially_update_point_of_interest,
        crate::inbound::http::points_of_interest::delete_point_of_interest,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::inbound::http::cities::CitySummaryResponse,
        crate::inbound::http::cities::CityResponse,
        crate::inbound::http::points_of_interest::PointOfInterestResponse,
        crate::inbound::http::points_of_interest::PointOfInterestCreateBody,
        crate::inbound::http::points_of_interest::PointOfInterestUpdateBody,
        crate::inbound::http::authentication::AuthenticationRequestBody,
        crate::inbound::http::authentication::AuthenticationResponseBody,
    ))
)]
pub struct ApiDoc;
