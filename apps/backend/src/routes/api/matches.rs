use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::dates::parse_datetime;
use crate::domain::matches::Winner;
use crate::domain::validation::{msg, FieldErrors};
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::extractors::{PathId, ValidatedJson};
use crate::repos::matches::Match;
use crate::services::matches::{MatchInput, MatchService};
use crate::state::app_state::AppState;

/// Flat match representation with the derived winner.
#[derive(Debug, Serialize)]
struct MatchRepr {
    id: i64,
    sport: Option<i64>,
    home_team: i64,
    away_team: i64,
    #[serde(with = "time::serde::rfc3339")]
    date_time: OffsetDateTime,
    location: String,
    status: MatchStatus,
    home_score: Option<i16>,
    away_score: Option<i16>,
    notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    winner: Option<Winner>,
}

impl From<Match> for MatchRepr {
    fn from(m: Match) -> Self {
        Self {
            winner: m.winner(),
            id: m.id,
            sport: m.sport_id,
            home_team: m.home_team_id,
            away_team: m.away_team_id,
            date_time: m.date_time,
            location: m.location,
            status: m.status,
            home_score: m.home_score,
            away_score: m.away_score,
            notes: m.notes,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MatchPayload {
    #[serde(default, with = "::serde_with::rust::double_option")]
    sport: Option<Option<i64>>,
    home_team: Option<i64>,
    away_team: Option<i64>,
    date_time: Option<String>,
    location: Option<String>,
    status: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    home_score: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    away_score: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    notes: Option<Option<String>>,
}

impl MatchPayload {
    /// Overlay onto `base`. Without a base (create, PUT) both teams and
    /// `date_time` are required.
    fn apply(self, base: Option<MatchInput>) -> Result<MatchInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let home_team_id = self.home_team.or(base.as_ref().map(|b| b.home_team_id));
        let away_team_id = self.away_team.or(base.as_ref().map(|b| b.away_team_id));
        if home_team_id.is_none() {
            errors.add("home_team", msg::REQUIRED);
        }
        if away_team_id.is_none() {
            errors.add("away_team", msg::REQUIRED);
        }

        let date_time = match self.date_time.as_deref().map(str::trim) {
            Some(raw) => {
                let parsed = parse_datetime(raw);
                if parsed.is_none() {
                    errors.add("date_time", msg::INVALID_DATETIME);
                }
                parsed
            }
            None => {
                let current = base.as_ref().map(|b| b.date_time);
                if current.is_none() {
                    errors.add("date_time", msg::REQUIRED);
                }
                current
            }
        };

        let status = match self.status.as_deref().map(str::trim) {
            Some(raw) => MatchStatus::parse(raw).unwrap_or_else(|| {
                errors.add("status", msg::invalid_choice_value(raw));
                MatchStatus::default()
            }),
            None => base.as_ref().map(|b| b.status).unwrap_or_default(),
        };

        let base_sport = base.as_ref().and_then(|b| b.sport_id);
        let base_home_score = base.as_ref().and_then(|b| b.home_score);
        let base_away_score = base.as_ref().and_then(|b| b.away_score);
        let (base_location, base_notes) = base
            .map(|b| (b.location, b.notes))
            .unwrap_or_default();

        match (home_team_id, away_team_id, date_time) {
            (Some(home_team_id), Some(away_team_id), Some(date_time)) if errors.is_empty() => {
                Ok(MatchInput {
                    sport_id: self.sport.unwrap_or(base_sport),
                    home_team_id,
                    away_team_id,
                    date_time,
                    location: self.location.unwrap_or(base_location),
                    status,
                    home_score: self.home_score.unwrap_or(base_home_score),
                    away_score: self.away_score.unwrap_or(base_away_score),
                    notes: self.notes.unwrap_or(base_notes),
                })
            }
            _ => Err(errors),
        }
    }
}

/// GET /api/matches/
async fn list(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let matches = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(MatchService::new().list_all(txn).await?) })
    })
    .await?;
    let body: Vec<MatchRepr> = matches.into_iter().map(MatchRepr::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/matches/
async fn create(
    req: HttpRequest,
    body: ValidatedJson<MatchPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().apply(None)?;
    let record = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(MatchService::new().create(txn, input).await?) })
    })
    .await?;
    Ok(HttpResponse::Created().json(MatchRepr::from(record)))
}

/// GET /api/matches/{id}/
async fn retrieve(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let match_id = id.get();
    let record = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(MatchService::new().get(txn, match_id).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(MatchRepr::from(record)))
}

async fn write(
    req: HttpRequest,
    id: PathId,
    payload: MatchPayload,
    partial: bool,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let match_id = id.get();
    let record = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            let service = MatchService::new();
            let current = service.get(txn, match_id).await?;
            let base = partial.then(|| MatchInput::from(current));
            let input = payload.apply(base)?;
            Ok(service.update(txn, match_id, input).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(MatchRepr::from(record)))
}

/// PUT /api/matches/{id}/
async fn update(
    req: HttpRequest,
    id: PathId,
    body: ValidatedJson<MatchPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    write(req, id, body.into_inner(), false, app_state).await
}

/// PATCH /api/matches/{id}/
async fn partial_update(
    req: HttpRequest,
    id: PathId,
    body: ValidatedJson<MatchPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    write(req, id, body.into_inner(), true, app_state).await
}

/// DELETE /api/matches/{id}/
async fn destroy(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let match_id = id.get();
    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(MatchService::new().delete(txn, match_id).await?) })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/matches/")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/matches/{id}/")
            .route(web::get().to(retrieve))
            .route(web::put().to(update))
            .route(web::patch().to(partial_update))
            .route(web::delete().to(destroy)),
    );
}
