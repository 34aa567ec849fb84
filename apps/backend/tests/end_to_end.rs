//! Register, log in, use the token, tamper with it, let it expire.

mod common;
mod support;

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use support::auth::{bearer, register, login, PASSWORD};
use support::{build_test_state, create_test_app, TestState};

fn tamper_last_char(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    let last = chars.last_mut().expect("token is not empty");
    *last = if *last == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

#[actix_web::test]
async fn token_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let TestState { state, clock } = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user = register(&app, "e2e@example.test").await;
    let token = login(&app, "e2e@example.test", PASSWORD).await;

    // Fresh token reaches the protected profile.
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["id"], user["id"]);
    assert_eq!(profile["email"], "e2e@example.test");
    assert!(profile.get("password_hash").is_none());

    // Profile update goes through the same identity.
    let req = test::TestRequest::put()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .set_json(json!({ "first_name": "Grace", "last_name": "Hopper" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["first_name"], "Grace");
    assert_eq!(updated["last_name"], "Hopper");

    // One altered signature character.
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&tamper_last_char(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    common::assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT", None).await;

    // Still valid one second before the 72h mark.
    clock.advance(Duration::from_secs(72 * 60 * 60 - 1));
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 73h after issue.
    clock.advance(Duration::from_secs(60 * 60 + 1));
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    common::assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_EXPIRED_JWT", None).await;

    // A new login yields a working token again.
    let fresh = login(&app, "e2e@example.test", PASSWORD).await;
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&fresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn profile_update_requires_names() -> Result<(), Box<dyn std::error::Error>> {
    let TestState { state, .. } = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    register(&app, "names@example.test").await;
    let token = login(&app, "names@example.test", PASSWORD).await;

    let req = test::TestRequest::put()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .set_json(json!({ "first_name": "  ", "last_name": "Hopper" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    common::assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_NAME", None).await;
    Ok(())
}
