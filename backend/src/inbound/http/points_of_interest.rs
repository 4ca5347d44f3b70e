//! Point-of-interest API handlers.
//!
//! ```text
//! GET    /api/cities/{cityId}/pointsofinterest
//! GET    /api/cities/{cityId}/pointsofinterest/{pointOfInterestId}
//! POST   /api/cities/{cityId}/pointsofinterest
//! PUT    /api/cities/{cityId}/pointsofinterest/{pointOfInterestId}
//! PATCH  /api/cities/{cityId}/pointsofinterest/{pointOfInterestId}
//! DELETE /api/cities/{cityId}/pointsofinterest/{pointOfInterestId}
//! ```
//!
//! Mutations stage a change set and commit it before responding; partial
//! updates apply an RFC 6902 document to a working copy, re-validate the
//! whole object, and only then stage the replacement.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ChangeSet;
use crate::domain::{CityId, Error, PointOfInterest, PointOfInterestDraft, PointOfInterestId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_description, parse_name};

/// Point-of-interest representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestResponse {
    /// Store-assigned identifier.
    pub id: i32,
    /// Point-of-interest name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&PointOfInterest> for PointOfInterestResponse {
    fn from(point: &PointOfInterest) -> Self {
        Self {
            id: point.id().value(),
            name: point.name().as_str().to_owned(),
            description: point.description().map(|d| d.as_str().to_owned()),
        }
    }
}

/// Request body for creating a point of interest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestCreateBody {
    /// Required name, at most 50 characters.
    pub name: String,
    /// Optional description, at most 200 characters.
    pub description: Option<String>,
}

/// Request body for fully replacing a point of interest.
///
/// Also serves as the working copy for partial updates, so the description
/// is always serialised (as `null` when absent) and patch operations can
/// target it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestUpdateBody {
    /// Required name, at most 50 characters.
    pub name: String,
    /// Optional description, at most 200 characters.
    pub description: Option<String>,
}

impl From<&PointOfInterest> for PointOfInterestUpdateBody {
    fn from(point: &PointOfInterest) -> Self {
        Self {
            name: point.name().as_str().to_owned(),
            description: point.description().map(|d| d.as_str().to_owned()),
        }
    }
}

fn draft_from_parts(
    name: String,
    description: Option<String>,
) -> Result<PointOfInterestDraft, Error> {
    Ok(PointOfInterestDraft::new(
        parse_name(name, FieldName::new("name"))?,
        parse_description(description, FieldName::new("description"))?,
    ))
}

impl PointOfInterestCreateBody {
    fn into_draft(self) -> Result<PointOfInterestDraft, Error> {
        draft_from_parts(self.name, self.description)
    }
}

impl PointOfInterestUpdateBody {
    fn into_draft(self) -> Result<PointOfInterestDraft, Error> {
        draft_from_parts(self.name, self.description)
    }
}

fn city_not_found(city_id: CityId) -> Error {
    Error::not_found(format!("city {city_id} does not exist"))
}

async fn find_point_or_not_found(
    state: &HttpState,
    city_id: CityId,
    point_id: PointOfInterestId,
) -> Result<PointOfInterest, Error> {
    state
        .repository
        .find_point_of_interest(city_id, point_id)
        .await?
        .ok_or_else(|| {
            Error::not_found(format!(
                "point of interest {point_id} does not exist in city {city_id}"
            ))
        })
}

/// List a city's points of interest.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}/pointsofinterest",
    params(("cityId" = i32, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Points of interest, ordered by id", body = [PointOfInterestResponse]),
        (status = 404, description = "City not found", body = Error)
    ),
    tags = ["points-of-interest"],
    operation_id = "listPointsOfInterest"
)]
#[get("/cities/{city_id}/pointsofinterest")]
pub async fn list_points_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<PointOfInterestResponse>>> {
    let city_id = CityId::new(path.into_inner());
    if !state.repository.city_exists(city_id).await? {
        return Err(city_not_found(city_id));
    }

    let points = state.repository.list_points_of_interest(city_id).await?;
    Ok(web::Json(
        points.iter().map(PointOfInterestResponse::from).collect(),
    ))
}

/// Fetch one point of interest.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}/pointsofinterest/{pointOfInterestId}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("pointOfInterestId" = i32, Path, description = "Point-of-interest identifier"),
    ),
    responses(
        (status = 200, description = "The point of interest", body = PointOfInterestResponse),
        (status = 404, description = "City or point of interest not found", body = Error)
    ),
    tags = ["points-of-interest"],
    operation_id = "getPointOfInterest"
)]
#[get("/cities/{city_id}/pointsofinterest/{point_id}")]
pub async fn get_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<web::Json<PointOfInterestResponse>> {
    let (city_id, point_id) = path.into_inner();
    let point = find_point_or_not_found(
        &state,
        CityId::new(city_id),
        PointOfInterestId::new(point_id),
    )
    .await?;
    Ok(web::Json(PointOfInterestResponse::from(&point)))
}

/// Create a point of interest under a city.
#[utoipa::path(
    post,
    path = "/api/cities/{cityId}/pointsofinterest",
    params(("cityId" = i32, Path, description = "City identifier")),
    request_body = PointOfInterestCreateBody,
    responses(
        (status = 201, description = "Created; Location references the new resource", body = PointOfInterestResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "City not found", body = Error)
    ),
    tags = ["points-of-interest"],
    operation_id = "createPointOfInterest"
)]
#[post("/cities/{city_id}/pointsofinterest")]
pub async fn create_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    body: web::Json<PointOfInterestCreateBody>,
) -> ApiResult<HttpResponse> {
    let city_id = CityId::new(path.into_inner());
    let draft = body.into_inner().into_draft()?;

    if !state.repository.city_exists(city_id).await? {
        return Err(city_not_found(city_id));
    }

    let mut changes = ChangeSet::new();
    changes.add_point_of_interest(city_id, draft);
    let outcome = state.repository.commit(changes).await?;
    let created = outcome
        .created()
        .first()
        .ok_or_else(|| Error::internal("commit reported no created point of interest"))?;

    let location = format!("/api/cities/{city_id}/pointsofinterest/{}", created.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(PointOfInterestResponse::from(created)))
}

/// Fully replace a point of interest's mutable fields.
#[utoipa::path(
    put,
    path = "/api/cities/{cityId}/pointsofinterest/{pointOfInterestId}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("pointOfInterestId" = i32, Path, description = "Point-of-interest identifier"),
    ),
    request_body = PointOfInterestUpdateBody,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "City or point of interest not found", body = Error)
    ),
    tags = ["points-of-interest"],
    operation_id = "updatePointOfInterest"
)]
#[put("/cities/{city_id}/pointsofinterest/{point_id}")]
pub async fn update_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
    body: web::Json<PointOfInterestUpdateBody>,
) -> ApiResult<HttpResponse> {
    let (city_id, point_id) = path.into_inner();
    let city_id = CityId::new(city_id);
    let existing =
        find_point_or_not_found(&state, city_id, PointOfInterestId::new(point_id)).await?;
    let draft = body.into_inner().into_draft()?;

    let mut changes = ChangeSet::new();
    changes.update_point_of_interest(city_id, existing.id(), draft);
    state.repository.commit(changes).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Partially update a point of interest with an RFC 6902 patch document.
///
/// The document is applied to a working copy which is then re-validated as
/// a whole; the store is only touched when the patched object is valid.
#[utoipa::path(
    patch,
    path = "/api/cities/{cityId}/pointsofinterest/{pointOfInterestId}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("pointOfInterestId" = i32, Path, description = "Point-of-interest identifier"),
    ),
    request_body(content = serde_json::Value, description = "RFC 6902 patch operations"),
    responses(
        (status = 204, description = "Patched"),
        (status = 400, description = "Invalid patch document or resulting state", body = Error),
        (status = 404, description = "City or point of interest not found", body = Error)
    ),
    tags = ["points-of-interest"],
    operation_id = "partiallyUpdatePointOfInterest"
)]
#[patch("/cities/{city_id}/pointsofinterest/{point_id}")]
pub async fn partially_update_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
    patch_document: web::Json<json_patch::Patch>,
) -> ApiResult<HttpResponse> {
    let (city_id, point_id) = path.into_inner();
    let city_id = CityId::new(city_id);
    let existing =
        find_point_or_not_found(&state, city_id, PointOfInterestId::new(point_id)).await?;

    let mut working = serde_json::to_value(PointOfInterestUpdateBody::from(&existing))
        .map_err(|err| Error::internal(format!("working copy serialisation: {err}")))?;
    json_patch::patch(&mut working, &patch_document.into_inner())
        .map_err(|err| Error::invalid_request(format!("invalid patch document: {err}")))?;
    let patched: PointOfInterestUpdateBody = serde_json::from_value(working).map_err(|err| {
        Error::invalid_request(format!("patched document is not a point of interest: {err}"))
    })?;
    let draft = patched.into_draft()?;

    let mut changes = ChangeSet::new();
    changes.update_point_of_interest(city_id, existing.id(), draft);
    state.repository.commit(changes).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a point of interest and notify the operator mailbox.
#[utoipa::path(
    delete,
    path = "/api/cities/{cityId}/pointsofinterest/{pointOfInterestId}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("pointOfInterestId" = i32, Path, description = "Point-of-interest identifier"),
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "City or point of interest not found", body = Error)
    ),
    tags = ["points-of-interest"],
    operation_id = "deletePointOfInterest"
)]
#[delete("/cities/{city_id}/pointsofinterest/{point_id}")]
pub async fn delete_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<HttpResponse> {
    let (city_id, point_id) = path.into_inner();
    let city_id = CityId::new(city_id);
    let existing =
        find_point_or_not_found(&state, city_id, PointOfInterestId::new(point_id)).await?;

    let mut changes = ChangeSet::new();
    changes.delete_point_of_interest(city_id, existing.id());
    state.repository.commit(changes).await?;

    state.mail.send(
        "Point of interest deleted",
        &format!(
            "Point of interest {} with id {} was deleted.",
            existing.name(),
            existing.id()
        ),
    );
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockMailService;
    use crate::inbound::http::test_utils::{fixture_state, state_with_mail};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn test_app(
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
        App::new().app_data(state).service(
            web::scope("/api")
                .service(list_points_of_interest)
                .service(get_point_of_interest)
                .service(create_point_of_interest)
                .service(update_point_of_interest)
                .service(partially_update_point_of_interest)
                .service(delete_point_of_interest),
        )
    }

    #[actix_web::test]
    async fn listing_for_a_missing_city_returns_not_found() {
        let app = test::init_service(test_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/cities/999/pointsofinterest")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn creation_validates_the_name_length() {
        let app = test::init_service(test_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/cities/1/pointsofinterest")
                .set_json(json!({ "name": "x".repeat(51) }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.pointer("/details/code").and_then(Value::as_str),
            Some("name_too_long")
        );
    }

    #[actix_web::test]
    async fn creation_returns_location_of_the_new_resource() {
        let app = test::init_service(test_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/cities/1/pointsofinterest")
                .set_json(json!({ "name": "Times Square", "description": "Busy" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let location = res
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .expect("location header")
            .to_owned();
        let body: Value = test::read_body_json(res).await;
        let id = body.get("id").and_then(Value::as_i64).expect("id");
        assert_eq!(location, format!("/api/cities/1/pointsofinterest/{id}"));

        // The resource the header references must resolve.
        let res = test::call_service(&app, test::TestRequest::get().uri(&location).to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn patch_replacing_the_description_succeeds() {
        let app = test::init_service(test_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri("/api/cities/1/pointsofinterest/1")
                .set_json(json!([
                    { "op": "replace", "path": "/description", "value": "Renovated" }
                ]))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/cities/1/pointsofinterest/1")
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.get("description").and_then(Value::as_str),
            Some("Renovated")
        );
    }

    #[actix_web::test]
    async fn patch_violating_validation_leaves_the_store_unchanged() {
        let app = test::init_service(test_app(fixture_state())).await;
        let before: Value = test::read_body_json(
            test::call_service(
                &app,
                test::TestRequest::get()
                    .uri("/api/cities/1/pointsofinterest/1")
                    .to_request(),
            )
            .await,
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri("/api/cities/1/pointsofinterest/1")
                .set_json(json!([
                    { "op": "replace", "path": "/name", "value": "x".repeat(51) }
                ]))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let after: Value = test::read_body_json(
            test::call_service(
                &app,
                test::TestRequest::get()
                    .uri("/api/cities/1/pointsofinterest/1")
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(before, after);
    }

    #[actix_web::test]
    async fn patch_with_an_unknown_path_is_a_bad_request() {
        let app = test::init_service(test_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri("/api/cities/1/pointsofinterest/1")
                .set_json(json!([
                    { "op": "replace", "path": "/invalidProperty", "value": "whatever" }
                ]))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn deletion_notifies_the_operator_mailbox_once() {
        let mut mail = MockMailService::new();
        mail.expect_send()
            .withf(|subject, message| {
                subject == "Point of interest deleted" && message.contains("with id 1")
            })
            .times(1)
            .return_const(());

        let app = test::init_service(test_app(state_with_mail(Arc::new(mail)))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/cities/1/pointsofinterest/1")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/cities/1/pointsofinterest/1")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
