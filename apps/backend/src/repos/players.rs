//! Player repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::Date;

use crate::adapters::players_sea as players_adapter;
use crate::domain::players::display_name;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::teams::Team;

pub use players_adapter::PlayerWrite;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<i64>,
    pub position: String,
    pub number: Option<i16>,
    #[serde(with = "crate::domain::dates::iso_date::option")]
    pub date_of_birth: Option<Date>,
    pub nationality: String,
}

impl Player {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

pub async fn count_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, DomainError> {
    Ok(players_adapter::count(conn).await?)
}

pub async fn list_page_with_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<(Player, Option<Team>)>, DomainError> {
    let rows = players_adapter::list_page_with_team(conn, offset, limit).await?;
    Ok(rows
        .into_iter()
        .map(|(p, t)| (Player::from(p), t.map(Team::from)))
        .collect())
}

pub async fn require_player_with_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(Player, Option<Team>), DomainError> {
    players_adapter::find_with_team(conn, player_id)
        .await?
        .map(|(p, t)| (Player::from(p), t.map(Team::from)))
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
        })
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    players_adapter::find_by_id(conn, player_id)
        .await?
        .map(Player::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
        })
}

pub async fn list_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<Player>, DomainError> {
    let rows = players_adapter::list_by_team(conn, team_id).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

/// Rosters for many teams in one query, each in roster order.
pub async fn list_by_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<Player>, DomainError> {
    let rows = players_adapter::list_by_teams(conn, team_ids).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn number_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    number: i16,
    exclude_id: Option<i64>,
) -> Result<bool, DomainError> {
    Ok(players_adapter::number_taken(conn, team_id, number, exclude_id).await?)
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerWrite,
) -> Result<Player, DomainError> {
    Ok(Player::from(players_adapter::create_player(conn, dto).await?))
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    dto: PlayerWrite,
) -> Result<Player, DomainError> {
    Ok(Player::from(
        players_adapter::update_player(conn, player_id, dto).await?,
    ))
}

pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), DomainError> {
    match players_adapter::delete_player(conn, player_id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found"),
        )),
        _ => Ok(()),
    }
}

impl From<crate::entities::players::Model> for Player {
    fn from(model: crate::entities::players::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            team_id: model.team_id,
            position: model.position,
            number: model.number,
            date_of_birth: model.date_of_birth,
            nationality: model.nationality,
        }
    }
}
