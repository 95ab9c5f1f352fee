//! Player service.

use sea_orm::ConnectionTrait;
use time::Date;
use tracing::info;

use crate::domain::pagination::{Page, PageRequest, PLAYERS_PAGE_SIZE};
use crate::domain::positions::{is_valid_position, DEFAULT_POSITION};
use crate::domain::validation::{msg, FieldErrors};
use crate::errors::domain::DomainError;
use crate::repos::players::{self, Player, PlayerWrite};
use crate::repos::teams::{self, Team};
use crate::services::reject_if_any;

pub const FIRST_NAME_MAX: usize = 50;
pub const LAST_NAME_MAX: usize = 50;
pub const NATIONALITY_MAX: usize = 50;
pub const NUMBER_MAX: i64 = i16::MAX as i64;

#[derive(Debug, Clone)]
pub struct PlayerInput {
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<i64>,
    pub position: String,
    pub number: Option<i64>,
    pub date_of_birth: Option<Date>,
    pub nationality: String,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            team_id: None,
            position: DEFAULT_POSITION.to_string(),
            number: None,
            date_of_birth: None,
            nationality: String::new(),
        }
    }
}

impl From<Player> for PlayerInput {
    fn from(player: Player) -> Self {
        Self {
            first_name: player.first_name,
            last_name: player.last_name,
            team_id: player.team_id,
            position: player.position,
            number: player.number.map(i64::from),
            date_of_birth: player.date_of_birth,
            nationality: player.nationality,
        }
    }
}

/// A player with its team loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerWithTeam {
    pub player: Player,
    pub team: Option<Team>,
}

pub struct PlayerService;

impl PlayerService {
    pub fn new() -> Self {
        Self
    }

    /// Players by team name, number, last name; team joined in the same query.
    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: PageRequest,
    ) -> Result<Page<PlayerWithTeam>, DomainError> {
        let total = players::count_players(conn).await?;
        let window = page.window(total, PLAYERS_PAGE_SIZE);
        let rows = players::list_page_with_team(conn, window.offset, window.page_size).await?;
        let items = rows
            .into_iter()
            .map(|(player, team)| PlayerWithTeam { player, team })
            .collect();
        Ok(Page::new(items, window))
    }

    /// Every player, in listing order.
    pub async fn list_all<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Player>, DomainError> {
        let total = players::count_players(conn).await?;
        let rows = players::list_page_with_team(conn, 0, total.max(1)).await?;
        Ok(rows.into_iter().map(|(player, _)| player).collect())
    }

    pub async fn detail<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i64,
    ) -> Result<PlayerWithTeam, DomainError> {
        let (player, team) = players::require_player_with_team(conn, player_id).await?;
        Ok(PlayerWithTeam { player, team })
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i64,
    ) -> Result<Player, DomainError> {
        players::require_player(conn, player_id).await
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        input: PlayerInput,
    ) -> Result<Player, DomainError> {
        let write = self.validate(conn, &input, None).await?;
        let player = players::create_player(conn, write).await?;
        info!(player_id = player.id, team_id = ?player.team_id, "Created player");
        Ok(player)
    }

    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i64,
        input: PlayerInput,
    ) -> Result<Player, DomainError> {
        players::require_player(conn, player_id).await?;
        let write = self.validate(conn, &input, Some(player_id)).await?;
        let player = players::update_player(conn, player_id, write).await?;
        info!(player_id = player.id, team_id = ?player.team_id, "Updated player");
        Ok(player)
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i64,
    ) -> Result<(), DomainError> {
        players::delete_player(conn, player_id).await?;
        info!(player_id, "Deleted player");
        Ok(())
    }

    /// Field checks against the union position vocabulary, then team
    /// existence and jersey-number uniqueness within the team.
    async fn validate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        input: &PlayerInput,
        exclude_id: Option<i64>,
    ) -> Result<PlayerWrite, DomainError> {
        let mut errors = FieldErrors::new();
        let first_name = errors.require_text("first_name", &input.first_name, FIRST_NAME_MAX);
        let last_name = input.last_name.trim().to_string();
        errors.check_max_len("last_name", &last_name, LAST_NAME_MAX);
        let nationality = input.nationality.trim().to_string();
        errors.check_max_len("nationality", &nationality, NATIONALITY_MAX);

        let position = input.position.trim().to_string();
        if position.is_empty() {
            errors.add("position", msg::REQUIRED);
        } else if !is_valid_position(&position) {
            errors.add("position", msg::invalid_choice_value(&position));
        }

        let number = match input.number {
            Some(n) => {
                errors.check_range("number", n, 0, NUMBER_MAX);
                i16::try_from(n).ok()
            }
            None => None,
        };

        if let Some(team_id) = input.team_id {
            if teams::find_team(conn, team_id).await?.is_none() {
                errors.add("team", msg::INVALID_CHOICE);
            } else if let Some(number) = number.filter(|_| !errors.has("number")) {
                if players::number_taken(conn, team_id, number, exclude_id).await? {
                    errors.add("number", msg::already_exists("Player", "Team and Number"));
                }
            }
        }

        reject_if_any("player", errors)?;

        Ok(PlayerWrite {
            first_name,
            last_name,
            team_id: input.team_id,
            position,
            number,
            date_of_birth: input.date_of_birth,
            nationality,
        })
    }
}

impl Default for PlayerService {
    fn default() -> Self {
        Self::new()
    }
}
