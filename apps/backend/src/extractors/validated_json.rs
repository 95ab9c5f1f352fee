//! JSON request bodies for the API.
//!
//! Decoding runs in two stages. Bytes that are not JSON at all are a 400
//! `BAD_REQUEST`. Valid JSON must be an object, which is then mapped onto
//! the payload type; keys holding the wrong kind of value come back as a
//! `VALIDATION_ERROR` keyed by the offending field.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use lazy_regex::regex_captures;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::validation::{msg, FieldErrors, NON_FIELD_ERRORS};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let path = req.path().to_string();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_ctx::trace_id(), error = %e, "Failed to read request body");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                body.extend_from_slice(&chunk);
            }

            let decoded = decode::<T>(&body);
            if let Err(e) = &decoded {
                debug!(
                    trace_id = %trace_ctx::trace_id(),
                    path = %path,
                    body_size = body.len(),
                    code = %e.code(),
                    "Rejected JSON body"
                );
            }
            decoded.map(ValidatedJson)
        })
    }
}

/// Bytes to payload, with errors shaped for the problem response.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "Request body is empty",
        ));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, syntax_detail(&e)))?;

    let Value::Object(object) = value else {
        return Err(FieldErrors::single(NON_FIELD_ERRORS, msg::EXPECTED_OBJECT).into());
    };

    match serde_json::from_value::<T>(Value::Object(object.clone())) {
        Ok(payload) => Ok(payload),
        Err(e) => {
            let errors = field_errors::<T>(&object, &e);
            if errors.is_empty() {
                Err(AppError::bad_request(
                    ErrorCode::BadRequest,
                    "Invalid JSON: wrong types for one or more fields",
                ))
            } else {
                Err(errors.into())
            }
        }
    }
}

fn syntax_detail(error: &serde_json::Error) -> String {
    if error.is_eof() {
        "Invalid JSON: unexpected end of input".to_string()
    } else {
        format!("Invalid JSON at line {}", error.line())
    }
}

/// Which keys of `object` the payload type refuses.
///
/// Payload fields are optional, so a one-key object fails only when that
/// key's value has the wrong type. A required field the object lacks is
/// reported as missing.
fn field_errors<T: DeserializeOwned>(
    object: &Map<String, Value>,
    whole: &serde_json::Error,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (key, value) in object {
        let single = Map::from_iter([(key.clone(), value.clone())]);
        if let Err(e) = serde_json::from_value::<T>(Value::Object(single)) {
            let text = e.to_string();
            if !text.starts_with("missing field") {
                errors.add(key.as_str(), type_message(&text));
            }
        }
    }

    if errors.is_empty() {
        if let Some((_, field)) = regex_captures!(r"^missing field `([^`]+)`", &whole.to_string()) {
            errors.add(field, msg::REQUIRED);
        }
    }
    errors
}

fn type_message(serde_text: &str) -> &'static str {
    if serde_text.contains("expected i64") || serde_text.contains("expected i32") {
        msg::VALID_INTEGER
    } else if serde_text.contains("expected a string") {
        msg::VALID_STRING
    } else if serde_text.contains("expected a sequence") {
        msg::EXPECTED_LIST
    } else {
        msg::INCORRECT_TYPE
    }
}
