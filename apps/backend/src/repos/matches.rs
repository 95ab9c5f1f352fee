//! Match repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::matches::{is_past, winner, Winner};
use crate::entities::matches::MatchStatus;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use matches_adapter::{MatchQuery, MatchWrite};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub id: i64,
    pub sport_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub location: String,
    pub status: MatchStatus,
    pub home_score: Option<i16>,
    pub away_score: Option<i16>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Match {
    pub fn winner(&self) -> Option<Winner> {
        winner(self.home_score, self.away_score)
    }

    pub fn is_past(&self, now: OffsetDateTime) -> bool {
        is_past(self.date_time, now)
    }
}

pub async fn count_matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &MatchQuery,
) -> Result<u64, DomainError> {
    Ok(matches_adapter::count(conn, query).await?)
}

pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &MatchQuery,
    offset: u64,
    limit: u64,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::list_page(conn, query, offset, limit).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

pub async fn list_matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    matches_adapter::find_by_id(conn, match_id)
        .await?
        .map(Match::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
        })
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchWrite,
    created_at: OffsetDateTime,
) -> Result<Match, DomainError> {
    Ok(Match::from(
        matches_adapter::create_match(conn, dto, created_at).await?,
    ))
}

pub async fn update_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    dto: MatchWrite,
) -> Result<Match, DomainError> {
    Ok(Match::from(
        matches_adapter::update_match(conn, match_id, dto).await?,
    ))
}

pub async fn delete_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<(), DomainError> {
    match matches_adapter::delete_match(conn, match_id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Match,
            format!("Match {match_id} not found"),
        )),
        _ => Ok(()),
    }
}

impl From<crate::entities::matches::Model> for Match {
    fn from(model: crate::entities::matches::Model) -> Self {
        Self {
            id: model.id,
            sport_id: model.sport_id,
            home_team_id: model.home_team_id,
            away_team_id: model.away_team_id,
            date_time: model.date_time,
            location: model.location,
            status: model.status,
            home_score: model.home_score,
            away_score: model.away_score,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}
