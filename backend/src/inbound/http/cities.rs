//! City API handlers.
//!
//! ```text
//! GET /api/cities?name=&searchQuery=&pageNumber=&pageSize=
//! GET /api/cities/{cityId}?includePointsOfInterest=bool
//! ```
//!
//! Listing returns shallow cities plus an `X-Pagination` header describing
//! the slice. Both endpoints require a bearer token.

use actix_web::{HttpResponse, get, web};
use pagination::{PAGINATION_HEADER, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CityFilter;
use crate::domain::{City, CityId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::points_of_interest::PointOfInterestResponse;
use crate::inbound::http::state::HttpState;

/// Hard cap applied to the requested page size.
const MAX_PAGE_SIZE: u32 = 20;
/// Page size used when the client does not send one.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters accepted by the city listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CityListQuery {
    /// Exact-name filter, matched after trimming whitespace.
    pub name: Option<String>,
    /// Case-sensitive substring search over name or description.
    pub search_query: Option<String>,
    /// 1-based page number; defaults to 1.
    pub page_number: Option<u32>,
    /// Page size; defaults to 10 and is silently capped at 20.
    pub page_size: Option<u32>,
}

/// Query parameters accepted by the city detail endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CityDetailQuery {
    /// Eagerly load the points-of-interest collection. Defaults to false.
    #[serde(default)]
    pub include_points_of_interest: bool,
}

/// Shallow city representation without its points of interest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CitySummaryResponse {
    /// Store-assigned identifier.
    pub id: i32,
    /// City name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&City> for CitySummaryResponse {
    fn from(city: &City) -> Self {
        Self {
            id: city.id().value(),
            name: city.name().as_str().to_owned(),
            description: city.description().map(|d| d.as_str().to_owned()),
        }
    }
}

/// City representation including its points of interest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityResponse {
    /// Store-assigned identifier.
    pub id: i32,
    /// City name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Points of interest owned by this city, ordered by id.
    pub points_of_interest: Vec<PointOfInterestResponse>,
}

impl From<&City> for CityResponse {
    fn from(city: &City) -> Self {
        Self {
            id: city.id().value(),
            name: city.name().as_str().to_owned(),
            description: city.description().map(|d| d.as_str().to_owned()),
            points_of_interest: city
                .points_of_interest()
                .iter()
                .map(PointOfInterestResponse::from)
                .collect(),
        }
    }
}

/// List cities matching the optional filters, one page at a time.
#[utoipa::path(
    get,
    path = "/api/cities",
    params(CityListQuery),
    responses(
        (status = 200, description = "One page of cities, shallow", body = [CitySummaryResponse],
            headers(("X-Pagination" = String, description = "Serialised pagination metadata"))),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    security(("BearerToken" = [])),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
    query: web::Query<CityListQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let page = PageRequest::clamped(
        query.page_number.unwrap_or(1),
        query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        MAX_PAGE_SIZE,
    );
    let filter = CityFilter::new(query.name, query.search_query);

    let (cities, metadata) = state.repository.list_cities(&filter, page).await?;

    let body: Vec<CitySummaryResponse> = cities.iter().map(CitySummaryResponse::from).collect();
    let metadata_header = serde_json::to_string(&metadata)
        .map_err(|err| Error::internal(format!("pagination metadata serialisation: {err}")))?;
    Ok(HttpResponse::Ok()
        .insert_header((PAGINATION_HEADER, metadata_header))
        .json(body))
}

/// Fetch one city, shallow by default or deep on request.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        CityDetailQuery,
    ),
    responses(
        (status = 200, description = "The city", body = CityResponse),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "City not found", body = Error)
    ),
    security(("BearerToken" = [])),
    tags = ["cities"],
    operation_id = "getCity"
)]
#[get("/cities/{city_id}")]
pub async fn get_city(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<CityDetailQuery>,
) -> ApiResult<HttpResponse> {
    let city_id = CityId::new(path.into_inner());
    let include = query.include_points_of_interest;

    let city = state
        .repository
        .find_city(city_id, include)
        .await?
        .ok_or_else(|| Error::not_found(format!("city {city_id} does not exist")))?;

    if include {
        Ok(HttpResponse::Ok().json(CityResponse::from(&city)))
    } else {
        Ok(HttpResponse::Ok().json(CitySummaryResponse::from(&city)))
    }
}
