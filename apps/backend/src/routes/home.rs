use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
struct Landing {
    app: &'static str,
    links: Links,
}

#[derive(Debug, Serialize)]
struct Links {
    teams: &'static str,
    players: &'static str,
    matches: &'static str,
    add_team: &'static str,
    add_player: &'static str,
    add_match: &'static str,
    api: &'static str,
}

/// GET /
async fn home() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(Landing {
        app: "League Manager",
        links: Links {
            teams: "/teams/",
            players: "/players/",
            matches: "/matches/",
            add_team: "/teams/add/",
            add_player: "/players/add/",
            add_match: "/matches/add/",
            api: "/api/",
        },
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home));
}
