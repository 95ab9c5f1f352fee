use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Record id taken from the `{id}` path segment.
///
/// Only the shape is checked here; existence is up to the service, which
/// reports the entity-specific not-found code.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl PathId {
    pub fn get(self) -> i64 {
        self.0
    }

    fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = raw.ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidId, "Missing id parameter")
        })?;

        let id = raw.parse::<i64>().map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidId, format!("Invalid id: {raw}"))
        })?;

        if id <= 0 {
            return Err(AppError::bad_request(
                ErrorCode::InvalidId,
                format!("Id must be positive, got: {id}"),
            ));
        }

        Ok(PathId(id))
    }
}

impl FromRequest for PathId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(Self::parse(req.match_info().get("id")))
    }
}
