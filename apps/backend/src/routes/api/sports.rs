use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{PathId, ValidatedJson};
use crate::services::sports::{SportInput, SportService};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
struct SportPayload {
    name: Option<String>,
    slug: Option<String>,
}

/// GET /api/sports/
async fn list(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sports = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(SportService::new().list(txn).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(sports))
}

/// POST /api/sports/
async fn create(
    req: HttpRequest,
    body: ValidatedJson<SportPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    let input = SportInput {
        name: payload.name.unwrap_or_default(),
        slug: payload.slug,
    };

    let sport = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(SportService::new().create(txn, input).await?) })
    })
    .await?;
    Ok(HttpResponse::Created().json(sport))
}

/// GET /api/sports/{id}/
async fn retrieve(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sport_id = id.get();
    let sport = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(SportService::new().get(txn, sport_id).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(sport))
}

/// DELETE /api/sports/{id}/
///
/// Clears match and primary-sport references and drops team associations.
async fn destroy(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sport_id = id.get();
    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { Ok(SportService::new().delete(txn, sport_id).await?) })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sports/")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/sports/{id}/")
            .route(web::get().to(retrieve))
            .route(web::delete().to(destroy)),
    );
}
