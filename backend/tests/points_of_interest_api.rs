//! End-to-end coverage for the point-of-interest endpoints.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use support::{sample_state, test_app};

async fn points_of(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    city_id: i32,
) -> Vec<Value> {
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/cities/{city_id}/pointsofinterest"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    body.as_array().expect("array body").clone()
}

#[actix_web::test]
async fn creating_under_a_missing_city_returns_not_found_without_mutating() {
    let app = test::init_service(test_app(sample_state())).await;
    let before = points_of(&app, 1).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/cities/999/pointsofinterest")
            .set_json(json!({ "name": "Nowhere", "description": "Should never exist" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert_eq!(points_of(&app, 1).await, before);
}

#[actix_web::test]
async fn created_points_are_readable_at_their_location() {
    let app = test::init_service(test_app(sample_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/cities/2/pointsofinterest")
            .set_json(json!({ "name": "Het Steen", "description": "A medieval fortress" }))
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

    let res = test::call_service(&app, test::TestRequest::get().uri(&location).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Het Steen"));
}

#[actix_web::test]
async fn full_replacement_overwrites_both_fields() {
    let app = test::init_service(test_app(sample_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/cities/1/pointsofinterest/1")
            .set_json(json!({ "name": "Renamed Park", "description": null }))
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
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Renamed Park"));
    // A null description is cleared, not preserved.
    assert!(body.get("description").is_none());
}

#[actix_web::test]
async fn replacing_a_missing_point_returns_not_found() {
    let app = test::init_service(test_app(sample_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/cities/1/pointsofinterest/999")
            .set_json(json!({ "name": "Ghost", "description": null }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn points_are_scoped_to_their_owning_city() {
    let app = test::init_service(test_app(sample_state())).await;

    // Point 1 belongs to city 1; reading it through city 2 must miss.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/cities/2/pointsofinterest/1")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleted_points_stay_gone() {
    let app = test::init_service(test_app(sample_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/cities/1/pointsofinterest/2")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/cities/1/pointsofinterest/2")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let remaining = points_of(&app, 1).await;
    assert_eq!(remaining.len(), 1);
}
