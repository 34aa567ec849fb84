#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert the RFC 7807 contract plus the status-specific headers:
/// 401 carries `WWW-Authenticate: Bearer`, 503 carries `Retry-After`,
/// everything else carries neither.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> ProblemDetailsLike {
    let headers = resp.headers().clone();

    match expected_status.as_u16() {
        401 => {
            let www_auth = headers
                .get("WWW-Authenticate")
                .expect("401 responses must have WWW-Authenticate header");
            assert_eq!(www_auth.to_str().unwrap(), "Bearer");
            assert!(headers.get("Retry-After").is_none());
        }
        503 => {
            assert!(
                headers.get("Retry-After").is_some(),
                "503 responses must have Retry-After header"
            );
            assert!(headers.get("WWW-Authenticate").is_none());
        }
        _ => {
            assert!(
                headers.get("WWW-Authenticate").is_none(),
                "{expected_status} responses must not have WWW-Authenticate header"
            );
            assert!(headers.get("Retry-After").is_none());
        }
    }

    let problem = assert_problem_details_from_service_response(
        resp,
        expected_code,
        expected_status,
        expected_detail,
    )
    .await;

    assert!(
        problem
            .type_
            .starts_with("https://storefront.example/errors/"),
        "type should follow the expected URL format (got {})",
        problem.type_
    );
    problem
}
