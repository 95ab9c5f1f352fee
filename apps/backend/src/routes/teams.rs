//! Team pages: list, add form, detail. Each returns the JSON context the
//! page template would render.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{see_other, ListQuery};
use crate::db::txn::with_txn;
use crate::domain::listing::SportSelector;
use crate::domain::pagination::{Page, PageRequest};
use crate::error::AppError;
use crate::extractors::{FormData, PathId};
use crate::forms::TeamForm;
use crate::repos::players::Player;
use crate::repos::sports::Sport;
use crate::repos::teams::Team;
use crate::services::sports::SportService;
use crate::services::teams::{TeamDetail, TeamService, TeamSummary};
use crate::state::app_state::AppState;
use crate::state::site_config::SiteConfig;

#[derive(Debug, Serialize)]
pub(crate) struct TeamCard {
    #[serde(flatten)]
    pub team: Team,
    pub logo_url: Option<String>,
    pub sports: Vec<Sport>,
}

impl TeamCard {
    fn new(summary: TeamSummary, site: &SiteConfig) -> Self {
        Self {
            logo_url: summary.team.logo.as_deref().map(|p| site.media(p)),
            team: summary.team,
            sports: summary.sports,
        }
    }
}

#[derive(Debug, Serialize)]
struct RosterEntry {
    #[serde(flatten)]
    player: Player,
    display_name: String,
}

#[derive(Debug, Serialize)]
struct TeamPage {
    #[serde(flatten)]
    team: Team,
    logo_url: Option<String>,
    sport: Option<Sport>,
    sports: Vec<Sport>,
    players: Vec<RosterEntry>,
}

impl TeamPage {
    fn new(detail: TeamDetail, site: &SiteConfig) -> Self {
        Self {
            logo_url: detail.team.logo.as_deref().map(|p| site.media(p)),
            team: detail.team,
            sport: detail.sport,
            sports: detail.sports,
            players: detail
                .players
                .into_iter()
                .map(|player| RosterEntry {
                    display_name: player.display_name(),
                    player,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TeamList {
    teams: Page<TeamCard>,
}

#[derive(Debug, Serialize)]
struct TeamFormInitial {
    sport: Option<i64>,
}

#[derive(Debug, Serialize)]
struct AddTeamContext {
    initial: TeamFormInitial,
    sports: Vec<Sport>,
}

/// GET /teams/
async fn list_teams(
    req: HttpRequest,
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::parse(query.page.as_deref());

    let listing = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(TeamService::new().list(txn, page).await?) })
    })
    .await?;

    let site = &app_state.site;
    Ok(HttpResponse::Ok().json(TeamList {
        teams: listing.map(|summary| TeamCard::new(summary, site)),
    }))
}

/// GET /teams/add/?sport=<id-or-slug>
///
/// A resolvable `sport` pre-selects the primary sport; anything else is
/// ignored.
async fn add_team_form(
    req: HttpRequest,
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let selector = SportSelector::parse(query.sport.as_deref());

    let context = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            let service = SportService::new();
            let initial = match &selector {
                Some(selector) => service.resolve(txn, selector).await?.map(|s| s.id),
                None => None,
            };
            Ok(AddTeamContext {
                initial: TeamFormInitial { sport: initial },
                sports: service.list(txn).await?,
            })
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(context))
}

/// POST /teams/add/
///
/// Team row and sport set are written in one transaction; 303 to the new
/// team's page.
async fn add_team(
    req: HttpRequest,
    form: FormData,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = TeamForm::clean(&form)?;

    let detail = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(TeamService::new().create(txn, input).await?) })
    })
    .await?;

    Ok(see_other(format!("/teams/{}/", detail.team.id)))
}

/// GET /teams/{id}/
async fn team_detail(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = id.get();

    let detail = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(TeamService::new().detail(txn, team_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TeamPage::new(detail, &app_state.site)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/teams/").route(web::get().to(list_teams)))
        .service(
            web::resource("/teams/add/")
                .route(web::get().to(add_team_form))
                .route(web::post().to(add_team)),
        )
        .service(web::resource("/teams/{id}/").route(web::get().to(team_detail)));
}
