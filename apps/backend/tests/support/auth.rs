//! Registration and login helpers that go through the real endpoints.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use serde_json::{json, Value};

pub const PASSWORD: &str = "correct-horse-battery";

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// POST /auth/register and return the created user body.
pub async fn register<S>(app: &S, email: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "email": email,
            "password": PASSWORD,
            "first_name": "Ada",
            "last_name": "Lovelace",
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "registration should succeed");
    test::read_body_json(resp).await
}

/// POST /auth/login and return the issued token.
pub async fn login<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");
    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}

/// Register then log in; returns `(user_id, token)`.
pub async fn signed_in_user<S>(app: &S, email: &str) -> (i64, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let user = register(app, email).await;
    let id = user["id"].as_i64().expect("user id");
    let token = login(app, email, PASSWORD).await;
    (id, token)
}
