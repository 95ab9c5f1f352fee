//! JSON API under `/api/`: CRUD over sports, teams, players and matches.
//!
//! Bodies are read with `ValidatedJson`; malformed JSON is a 400
//! `BAD_REQUEST`, field problems a 400 `VALIDATION_ERROR` with `errors`.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::error::AppError;

pub mod matches;
pub mod players;
pub mod sports;
pub mod teams;

#[derive(Debug, Serialize)]
struct ApiRoot {
    sports: String,
    teams: String,
    players: String,
    matches: String,
}

/// GET /api/
async fn api_root(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let info = req.connection_info();
    let base = format!("{}://{}/api", info.scheme(), info.host());
    Ok(HttpResponse::Ok().json(ApiRoot {
        sports: format!("{base}/sports/"),
        teams: format!("{base}/teams/"),
        players: format!("{base}/players/"),
        matches: format!("{base}/matches/"),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(api_root)))
        .configure(sports::configure_routes)
        .configure(teams::configure_routes)
        .configure(players::configure_routes)
        .configure(matches::configure_routes);
}
