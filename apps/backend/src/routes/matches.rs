//! Match pages.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{see_other, ListQuery};
use crate::db::txn::with_txn;
use crate::domain::listing::{SportSelector, TemporalFilter};
use crate::domain::pagination::PageRequest;
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::extractors::{FormData, PathId};
use crate::forms::MatchForm;
use crate::repos::sports::Sport;
use crate::repos::teams::Team;
use crate::services::matches::{MatchListing, MatchService};
use crate::services::sports::SportService;
use crate::services::teams::TeamService;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct StatusOption {
    value: MatchStatus,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct AddMatchContext {
    sports: Vec<Sport>,
    teams: Vec<Team>,
    statuses: Vec<StatusOption>,
}

#[derive(Debug, Serialize)]
struct MatchList {
    #[serde(flatten)]
    listing: MatchListing,
    filters: [TemporalFilter; 3],
}

const FILTERS: [TemporalFilter; 3] = [
    TemporalFilter::Upcoming,
    TemporalFilter::Past,
    TemporalFilter::All,
];

/// GET /matches/?sport=<id-or-slug>&filter=upcoming|past|all&page=N
async fn list_matches(
    req: HttpRequest,
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sport = SportSelector::parse(query.sport.as_deref());
    let filter = TemporalFilter::parse(query.filter.as_deref());
    let page = PageRequest::parse(query.page.as_deref());

    let listing = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            Ok(MatchService::new()
                .list(txn, sport.as_ref(), filter, page)
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(MatchList {
        listing,
        filters: FILTERS,
    }))
}

/// GET /matches/add/
async fn add_match_form(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (sports, teams) = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            let sports = SportService::new().list(txn).await?;
            let teams = TeamService::new()
                .list_with_sports(txn)
                .await?
                .into_iter()
                .map(|summary| summary.team)
                .collect::<Vec<_>>();
            Ok((sports, teams))
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(AddMatchContext {
        sports,
        teams,
        statuses: MatchStatus::CHOICES
            .into_iter()
            .map(|(value, label)| StatusOption { value, label })
            .collect(),
    }))
}

/// POST /matches/add/
///
/// Every rejection carries field errors; success is a 303 to the listing.
async fn add_match(
    req: HttpRequest,
    form: FormData,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = MatchForm::clean(&form)?;

    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(MatchService::new().create(txn, input).await?) })
    })
    .await?;

    Ok(see_other("/matches/".to_string()))
}

/// GET /matches/{id}/
async fn match_detail(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let match_id = id.get();

    let view = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(MatchService::new().detail(txn, match_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/matches/").route(web::get().to(list_matches)))
        .service(
            web::resource("/matches/add/")
                .route(web::get().to(add_match_form))
                .route(web::post().to(add_match)),
        )
        .service(web::resource("/matches/{id}/").route(web::get().to(match_detail)));
}
