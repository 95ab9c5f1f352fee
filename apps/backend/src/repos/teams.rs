//! Team repository functions.

use std::collections::{HashMap, HashSet};

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::teams_sea as teams_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::sports::Sport;

pub use teams_adapter::TeamWrite;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub founded: Option<i32>,
    pub logo: Option<String>,
    pub slug: String,
    pub sport_id: Option<i64>,
}

pub async fn count_teams<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(teams_adapter::count(conn).await?)
}

pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<Team>, DomainError> {
    let rows = teams_adapter::list_page(conn, offset, limit).await?;
    Ok(rows.into_iter().map(Team::from).collect())
}

pub async fn list_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Team>, DomainError> {
    let rows = teams_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Team::from).collect())
}

pub async fn find_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Team>, DomainError> {
    Ok(teams_adapter::find_by_id(conn, team_id).await?.map(Team::from))
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    find_team(conn, team_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
    })
}

/// Teams keyed by id; unknown ids are absent.
pub async fn find_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<HashMap<i64, Team>, DomainError> {
    let rows = teams_adapter::find_by_ids(conn, ids).await?;
    Ok(rows.into_iter().map(|m| (m.id, Team::from(m))).collect())
}

pub async fn name_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, DomainError> {
    Ok(teams_adapter::find_other_by_name(conn, name, exclude_id)
        .await?
        .is_some())
}

pub async fn taken_slugs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
    exclude_id: Option<i64>,
) -> Result<HashSet<String>, DomainError> {
    let slugs = teams_adapter::taken_slugs(conn, prefix, exclude_id).await?;
    Ok(slugs.into_iter().collect())
}

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TeamWrite,
) -> Result<Team, DomainError> {
    Ok(Team::from(teams_adapter::create_team(conn, dto).await?))
}

pub async fn update_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    dto: TeamWrite,
) -> Result<Team, DomainError> {
    Ok(Team::from(teams_adapter::update_team(conn, team_id, dto).await?))
}

pub async fn delete_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<(), DomainError> {
    match teams_adapter::delete_team(conn, team_id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Team,
            format!("Team {team_id} not found"),
        )),
        _ => Ok(()),
    }
}

/// Sport sets for many teams in one query. Every requested id gets an entry.
pub async fn sports_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<HashMap<i64, Vec<Sport>>, DomainError> {
    let mut out: HashMap<i64, Vec<Sport>> =
        team_ids.iter().map(|id| (*id, Vec::new())).collect();
    for (team_id, sport) in teams_adapter::sports_for_teams(conn, team_ids).await? {
        out.entry(team_id).or_default().push(Sport::from(sport));
    }
    Ok(out)
}

pub async fn replace_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    sport_ids: &[i64],
) -> Result<(), DomainError> {
    Ok(teams_adapter::replace_sports(conn, team_id, sport_ids).await?)
}

impl From<crate::entities::teams::Model> for Team {
    fn from(model: crate::entities::teams::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            founded: model.founded,
            logo: model.logo,
            slug: model.slug,
            sport_id: model.sport_id,
        }
    }
}
