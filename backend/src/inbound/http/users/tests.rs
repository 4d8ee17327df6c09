//! Tests for user registration and listing handlers.

use super::*;
use crate::test_support::{fixture_clock, in_memory_state, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::Value;

fn register(username: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/users")
        .set_form([("username", username)])
}

#[rstest]
#[actix_web::test]
async fn registration_returns_username_and_id() {
    let app = actix_test::init_service(test_app(in_memory_state(fixture_clock()))).await;

    let body: UserResponse =
        actix_test::call_and_read_body_json(&app, register("fcc_test").to_request()).await;

    assert_eq!(body.username, "fcc_test");
    assert!(body.id.parse::<crate::domain::UserId>().is_ok());
}

#[rstest]
#[actix_web::test]
async fn registration_is_idempotent() {
    let app = actix_test::init_service(test_app(in_memory_state(fixture_clock()))).await;

    let first: UserResponse =
        actix_test::call_and_read_body_json(&app, register("ada").to_request()).await;
    let second: UserResponse =
        actix_test::call_and_read_body_json(&app, register("ada").to_request()).await;
    let listed: Vec<UserResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;

    assert_eq!(first, second);
    assert_eq!(listed, vec![first]);
}

#[rstest]
#[actix_web::test]
async fn list_returns_every_user() {
    let app = actix_test::init_service(test_app(in_memory_state(fixture_clock()))).await;
    for name in ["ada", "grace", "linus"] {
        actix_test::call_service(&app, register(name).to_request()).await;
    }

    let listed: Vec<UserResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;

    let names: Vec<&str> = listed.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(names, vec!["ada", "grace", "linus"]);
}

#[rstest]
#[case::missing(None, "missing_field")]
#[case::blank(Some("   "), "blank_field")]
#[actix_web::test]
async fn invalid_usernames_are_rejected(#[case] username: Option<&str>, #[case] code: &str) {
    let app = actix_test::init_service(test_app(in_memory_state(fixture_clock()))).await;
    let form: Vec<(&str, &str)> = username.map(|name| ("username", name)).into_iter().collect();
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_form(form)
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], "username");
    assert_eq!(value["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn non_form_bodies_are_rejected() {
    let app = actix_test::init_service(test_app(in_memory_state(fixture_clock()))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(serde_json::json!({ "username": "ada" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["code"], "malformed_body");
}
