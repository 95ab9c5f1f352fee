//! Player pages.

use std::collections::BTreeMap;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{see_other, ListQuery};
use crate::db::txn::with_txn;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::positions::{
    position_label, sport_key, union_choices, Choice, DEFAULT_POSITION, SPORT_POSITIONS,
};
use crate::error::AppError;
use crate::extractors::{FormData, PathId};
use crate::forms::PlayerForm;
use crate::repos::players::Player;
use crate::repos::teams::Team;
use crate::services::players::{PlayerService, PlayerWithTeam};
use crate::services::teams::TeamService;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct PositionOption {
    code: &'static str,
    label: &'static str,
}

impl From<Choice> for PositionOption {
    fn from((code, label): Choice) -> Self {
        Self { code, label }
    }
}

#[derive(Debug, Serialize)]
struct PlayerRow {
    #[serde(flatten)]
    player: Player,
    display_name: String,
    position_label: String,
    team: Option<Team>,
}

impl From<PlayerWithTeam> for PlayerRow {
    fn from(PlayerWithTeam { player, team }: PlayerWithTeam) -> Self {
        Self {
            display_name: player.display_name(),
            position_label: position_label(&player.position).to_string(),
            player,
            team,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlayerList {
    players: Page<PlayerRow>,
}

#[derive(Debug, Serialize)]
struct TeamChoice {
    id: i64,
    name: String,
    /// Lowercase sport keys, used client-side to narrow `positions`.
    sports: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PlayerFormInitial {
    position: &'static str,
}

#[derive(Debug, Serialize)]
struct AddPlayerContext {
    initial: PlayerFormInitial,
    positions: Vec<PositionOption>,
    teams: Vec<TeamChoice>,
    sport_positions: BTreeMap<&'static str, Vec<PositionOption>>,
}

/// GET /players/
async fn list_players(
    req: HttpRequest,
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::parse(query.page.as_deref());

    let listing = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(PlayerService::new().list(txn, page).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlayerList {
        players: listing.map(PlayerRow::from),
    }))
}

/// GET /players/add/
async fn add_player_form(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let teams = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(TeamService::new().list_with_sports(txn).await?) })
    })
    .await?;

    let teams = teams
        .into_iter()
        .map(|summary| TeamChoice {
            id: summary.team.id,
            name: summary.team.name,
            // keyed by slug so a renamed sport keeps its position table
            sports: summary.sports.iter().map(|s| sport_key(&s.slug)).collect(),
        })
        .collect();

    let sport_positions = SPORT_POSITIONS
        .iter()
        .map(|(key, choices)| (*key, choices.iter().copied().map(PositionOption::from).collect()))
        .collect();

    Ok(HttpResponse::Ok().json(AddPlayerContext {
        initial: PlayerFormInitial {
            position: DEFAULT_POSITION,
        },
        positions: union_choices().into_iter().map(PositionOption::from).collect(),
        teams,
        sport_positions,
    }))
}

/// POST /players/add/
async fn add_player(
    req: HttpRequest,
    form: FormData,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = PlayerForm::clean(&form)?;

    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(PlayerService::new().create(txn, input).await?) })
    })
    .await?;

    Ok(see_other("/players/".to_string()))
}

/// GET /players/{id}/
async fn player_detail(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = id.get();

    let detail = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(PlayerService::new().detail(txn, player_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlayerRow::from(detail)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/players/").route(web::get().to(list_players)))
        .service(
            web::resource("/players/add/")
                .route(web::get().to(add_player_form))
                .route(web::post().to(add_player)),
        )
        .service(web::resource("/players/{id}/").route(web::get().to(player_detail)));
}
