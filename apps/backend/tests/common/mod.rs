#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Problem-details shape, code and trace-id parity, plus the league type URI.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> ProblemDetailsLike {
    let status = StatusCode::from_u16(expected_status).expect("valid status code");
    let problem =
        assert_problem_details_from_service_response(resp, expected_code, status, None).await;
    assert_eq!(
        problem.type_,
        format!("https://league.app/errors/{expected_code}")
    );
    assert!(!problem.trace_id.is_empty(), "trace_id should not be empty");
    assert!(!problem.title.is_empty(), "title should not be empty");
    problem
}

/// A 400 `VALIDATION_ERROR`; returns the `errors` object as JSON.
pub async fn assert_validation(resp: ServiceResponse<BoxBody>) -> Value {
    let problem = assert_problem(resp, 400, "VALIDATION_ERROR").await;
    let errors = problem
        .errors
        .expect("validation problems carry an errors object");
    serde_json::to_value(errors).expect("errors serialize")
}

/// A 303 redirect; returns the `Location`.
pub fn assert_see_other(resp: &ServiceResponse<BoxBody>) -> String {
    assert_eq!(resp.status().as_u16(), 303, "expected 303 See Other");
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect should carry a Location header")
        .to_string()
}

pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON ({e}): {}",
            String::from_utf8_lossy(&body)
        )
    })
}

/// `application/x-www-form-urlencoded` body from pairs; repeated keys allowed.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
