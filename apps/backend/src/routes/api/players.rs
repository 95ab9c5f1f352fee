use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::db::txn::with_txn;
use crate::domain::dates::parse_date;
use crate::domain::validation::{msg, FieldErrors};
use crate::error::AppError;
use crate::extractors::{PathId, ValidatedJson};
use crate::repos::players::Player;
use crate::services::players::{PlayerInput, PlayerService};
use crate::state::app_state::AppState;

/// Flat player representation; `team` is an id.
#[derive(Debug, Serialize)]
pub(crate) struct PlayerRepr {
    id: i64,
    first_name: String,
    last_name: String,
    team: Option<i64>,
    position: String,
    number: Option<i16>,
    #[serde(with = "crate::domain::dates::iso_date::option")]
    date_of_birth: Option<Date>,
    nationality: String,
}

impl From<Player> for PlayerRepr {
    fn from(p: Player) -> Self {
        Self {
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            team: p.team_id,
            position: p.position,
            number: p.number,
            date_of_birth: p.date_of_birth,
            nationality: p.nationality,
        }
    }
}

/// Write body. Absent keys keep the base value; explicit `null` clears a
/// nullable field.
#[derive(Debug, Default, Deserialize)]
struct PlayerPayload {
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    team: Option<Option<i64>>,
    position: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    number: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    date_of_birth: Option<Option<String>>,
    nationality: Option<String>,
}

impl PlayerPayload {
    fn apply(self, mut base: PlayerInput) -> Result<PlayerInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(v) = self.first_name {
            base.first_name = v;
        }
        if let Some(v) = self.last_name {
            base.last_name = v;
        }
        if let Some(v) = self.team {
            base.team_id = v;
        }
        if let Some(v) = self.position {
            base.position = v;
        }
        if let Some(v) = self.number {
            base.number = v;
        }
        if let Some(raw) = self.date_of_birth {
            base.date_of_birth = match raw.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(raw) => {
                    let parsed = parse_date(raw);
                    if parsed.is_none() {
                        errors.add("date_of_birth", msg::INVALID_DATE);
                    }
                    parsed
                }
            };
        }
        if let Some(v) = self.nationality {
            base.nationality = v;
        }
        errors.into_result().map(|()| base)
    }
}

/// GET /api/players/
async fn list(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let players = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(PlayerService::new().list_all(txn).await?) })
    })
    .await?;
    let body: Vec<PlayerRepr> = players.into_iter().map(PlayerRepr::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/players/
async fn create(
    req: HttpRequest,
    body: ValidatedJson<PlayerPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().apply(PlayerInput::default())?;
    let player = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(PlayerService::new().create(txn, input).await?) })
    })
    .await?;
    Ok(HttpResponse::Created().json(PlayerRepr::from(player)))
}

/// GET /api/players/{id}/
async fn retrieve(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = id.get();
    let player = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(PlayerService::new().get(txn, player_id).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(PlayerRepr::from(player)))
}

/// PUT replaces every field (omitted ones take their defaults); PATCH
/// starts from the stored player.
async fn write(
    req: HttpRequest,
    id: PathId,
    payload: PlayerPayload,
    partial: bool,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = id.get();
    let player = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            let base = if partial {
                PlayerInput::from(service.get(txn, player_id).await?)
            } else {
                PlayerInput::default()
            };
            let input = payload.apply(base)?;
            Ok(service.update(txn, player_id, input).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(PlayerRepr::from(player)))
}

/// PUT /api/players/{id}/
async fn update(
    req: HttpRequest,
    id: PathId,
    body: ValidatedJson<PlayerPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    write(req, id, body.into_inner(), false, app_state).await
}

/// PATCH /api/players/{id}/
async fn partial_update(
    req: HttpRequest,
    id: PathId,
    body: ValidatedJson<PlayerPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    write(req, id, body.into_inner(), true, app_state).await
}

/// DELETE /api/players/{id}/
async fn destroy(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = id.get();
    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(PlayerService::new().delete(txn, player_id).await?) })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/players/")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/players/{id}/")
            .route(web::get().to(retrieve))
            .route(web::put().to(update))
            .route(web::patch().to(partial_update))
            .route(web::delete().to(destroy)),
    );
}
