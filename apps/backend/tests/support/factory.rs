//! Seed helpers for integration tests. Everything goes through the services
//! so the same validation and slug rules apply as in production.

use league::entities::matches::MatchStatus;
use league::repos::matches::Match;
use league::repos::players::Player;
use league::repos::sports::Sport;
use league::services::matches::{MatchInput, MatchService};
use league::services::players::{PlayerInput, PlayerService};
use league::services::sports::{SportInput, SportService};
use league::services::teams::{TeamDetail, TeamInput, TeamService};
use league::DomainError;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

pub async fn sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Sport, DomainError> {
    SportService::new()
        .create(
            conn,
            SportInput {
                name: name.to_string(),
                slug: None,
            },
        )
        .await
}

/// A team playing `sports`; the first one becomes its primary sport.
pub async fn team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    sports: &[&Sport],
) -> Result<TeamDetail, DomainError> {
    TeamService::new()
        .create(
            conn,
            TeamInput {
                name: name.to_string(),
                city: "Springfield".to_string(),
                sport_id: sports.first().map(|s| s.id),
                sport_ids: sports.iter().map(|s| s.id).collect(),
                ..TeamInput::default()
            },
        )
        .await
}

pub async fn player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    first_name: &str,
    team_id: Option<i64>,
    number: Option<i64>,
) -> Result<Player, DomainError> {
    PlayerService::new()
        .create(
            conn,
            PlayerInput {
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                team_id,
                number,
                ..PlayerInput::default()
            },
        )
        .await
}

pub fn match_input(
    sport_id: Option<i64>,
    home_team_id: i64,
    away_team_id: i64,
    date_time: OffsetDateTime,
) -> MatchInput {
    MatchInput {
        sport_id,
        home_team_id,
        away_team_id,
        date_time,
        location: "Central Ground".to_string(),
        status: MatchStatus::Scheduled,
        home_score: None,
        away_score: None,
        notes: None,
    }
}

pub async fn fixture<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: Option<i64>,
    home_team_id: i64,
    away_team_id: i64,
    date_time: OffsetDateTime,
) -> Result<Match, DomainError> {
    MatchService::new()
        .create(conn, match_input(sport_id, home_team_id, away_team_id, date_time))
        .await
}
