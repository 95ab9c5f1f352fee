use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use super::players::PlayerRepr;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::{PathId, ValidatedJson};
use crate::repos::sports::Sport;
use crate::services::teams::{TeamDetail, TeamInput, TeamService};
use crate::state::app_state::AppState;

/// Nested team representation. `sport_id` / `sports_ids` are write-only.
#[derive(Debug, Serialize)]
struct TeamRepr {
    id: i64,
    name: String,
    city: String,
    founded: Option<i32>,
    logo: Option<String>,
    slug: String,
    sport: Option<Sport>,
    sports: Vec<Sport>,
    players: Vec<PlayerRepr>,
}

impl From<TeamDetail> for TeamRepr {
    fn from(detail: TeamDetail) -> Self {
        Self {
            id: detail.team.id,
            name: detail.team.name,
            city: detail.team.city,
            founded: detail.team.founded,
            logo: detail.team.logo,
            slug: detail.team.slug,
            sport: detail.sport,
            sports: detail.sports,
            players: detail.players.into_iter().map(PlayerRepr::from).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TeamPayload {
    name: Option<String>,
    city: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    founded: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    logo: Option<Option<String>>,
    slug: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    sport_id: Option<Option<i64>>,
    sports_ids: Option<Vec<i64>>,
}

impl TeamPayload {
    fn apply(self, mut base: TeamInput) -> TeamInput {
        if let Some(v) = self.name {
            base.name = v;
        }
        if let Some(v) = self.city {
            base.city = v;
        }
        if let Some(v) = self.founded {
            base.founded = v;
        }
        if let Some(v) = self.logo {
            base.logo = v;
        }
        if let Some(v) = self.slug {
            base.slug = Some(v);
        }
        if let Some(v) = self.sport_id {
            base.sport_id = v;
        }
        if let Some(v) = self.sports_ids {
            base.sport_ids = v;
        }
        base
    }
}

/// Field errors use the API's write-only names.
fn api_error(err: DomainError) -> AppError {
    match err {
        DomainError::Validation(mut errors) => {
            errors.rename("sport", "sport_id");
            errors.rename("sports", "sports_ids");
            AppError::invalid_form(errors)
        }
        other => other.into(),
    }
}

/// GET /api/teams/
async fn list(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let teams = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(TeamService::new().list_details(txn).await?) })
    })
    .await?;
    let body: Vec<TeamRepr> = teams.into_iter().map(TeamRepr::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/teams/
async fn create(
    req: HttpRequest,
    body: ValidatedJson<TeamPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().apply(TeamInput::default());
    let team = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { TeamService::new().create(txn, input).await.map_err(api_error) })
    })
    .await?;
    Ok(HttpResponse::Created().json(TeamRepr::from(team)))
}

/// GET /api/teams/{id}/
async fn retrieve(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = id.get();
    let team = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(TeamService::new().detail(txn, team_id).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(TeamRepr::from(team)))
}

/// PUT resets omitted fields except the sport set, which is only replaced
/// when `sports_ids` is sent. PATCH starts from the stored team.
async fn write(
    req: HttpRequest,
    id: PathId,
    payload: TeamPayload,
    partial: bool,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = id.get();
    let team = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            let service = TeamService::new();
            let current = service.current_input(txn, team_id).await?;
            let base = if partial {
                current
            } else {
                TeamInput {
                    sport_ids: current.sport_ids,
                    ..TeamInput::default()
                }
            };
            service
                .update(txn, team_id, payload.apply(base))
                .await
                .map_err(api_error)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(TeamRepr::from(team)))
}

/// PUT /api/teams/{id}/
async fn update(
    req: HttpRequest,
    id: PathId,
    body: ValidatedJson<TeamPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    write(req, id, body.into_inner(), false, app_state).await
}

/// PATCH /api/teams/{id}/
async fn partial_update(
    req: HttpRequest,
    id: PathId,
    body: ValidatedJson<TeamPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    write(req, id, body.into_inner(), true, app_state).await
}

/// DELETE /api/teams/{id}/
///
/// Matches involving the team go with it; its players are kept, teamless.
async fn destroy(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = id.get();
    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(TeamService::new().delete(txn, team_id).await?) })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/teams/")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/teams/{id}/")
            .route(web::get().to(retrieve))
            .route(web::put().to(update))
            .route(web::patch().to(partial_update))
            .route(web::delete().to(destroy)),
    );
}
