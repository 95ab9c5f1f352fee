use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod api;
pub mod health;
pub mod home;
pub mod matches;
pub mod players;
pub mod teams;

/// Register every route. `main.rs` and the test app builder share this, so
/// the served paths are the tested paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(home::configure_routes)
        .configure(health::configure_routes)
        .configure(teams::configure_routes)
        .configure(players::configure_routes)
        .configure(matches::configure_routes)
        .service(web::scope("/api").configure(api::configure_routes))
        .default_service(web::to(not_found));
}

/// Query string shared by the list views; every key is optional and
/// interpreted leniently.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub sport: Option<String>,
    pub filter: Option<String>,
}

/// 303 to `location`, the response to a successful form submission.
pub(crate) fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "No route matches this path"))
}
