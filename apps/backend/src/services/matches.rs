//! Match service: pairing validation, filtered listing and read models.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::listing::{SportSelector, TemporalFilter};
use crate::domain::matches::{check_pairing, match_label, normalize_instant, Side, Winner};
use crate::domain::pagination::{Page, PageRequest, MATCHES_PAGE_SIZE};
use crate::domain::validation::{msg, FieldErrors};
use crate::entities::matches::MatchStatus;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::matches::{self, Match, MatchQuery, MatchWrite};
use crate::repos::sports::{self, Sport};
use crate::repos::teams::{self, Team};
use crate::services::{dedup_ids, reject_if_any};

pub const LOCATION_MAX: usize = 200;
pub const SCORE_MAX: i64 = i16::MAX as i64;

#[derive(Debug, Clone)]
pub struct MatchInput {
    pub sport_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub date_time: OffsetDateTime,
    pub location: String,
    pub status: MatchStatus,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub notes: Option<String>,
}

impl From<Match> for MatchInput {
    fn from(record: Match) -> Self {
        Self {
            sport_id: record.sport_id,
            home_team_id: record.home_team_id,
            away_team_id: record.away_team_id,
            date_time: record.date_time,
            location: record.location,
            status: record.status,
            home_score: record.home_score.map(i64::from),
            away_score: record.away_score.map(i64::from),
            notes: record.notes,
        }
    }
}

/// A match with its sport and both teams resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub record: Match,
    pub sport: Option<Sport>,
    pub home_team: Option<Team>,
    pub away_team: Option<Team>,
    pub winner: Option<Winner>,
    pub is_past: bool,
    pub label: String,
}

/// The matches listing plus the selectors it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchListing {
    pub page: Page<MatchView>,
    pub sports: Vec<Sport>,
    pub selected_sport: Option<Sport>,
    pub filter: TemporalFilter,
}

pub struct MatchService;

impl MatchService {
    pub fn new() -> Self {
        Self
    }

    /// Sport-filtered, time-windowed page. An unknown sport selector yields
    /// an empty page rather than an unfiltered one.
    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        sport: Option<&SportSelector>,
        filter: TemporalFilter,
        page: PageRequest,
    ) -> Result<MatchListing, DomainError> {
        let all_sports = sports::list_sports(conn).await?;
        let selected_sport = match sport {
            Some(SportSelector::Id(id)) => all_sports.iter().find(|s| s.id == *id).cloned(),
            Some(SportSelector::Slug(slug)) => all_sports
                .iter()
                .find(|s| s.slug.eq_ignore_ascii_case(slug))
                .cloned(),
            None => None,
        };

        if sport.is_some() && selected_sport.is_none() {
            debug!(?sport, "Unknown sport selector, empty listing");
            let window = page.window(0, MATCHES_PAGE_SIZE);
            return Ok(MatchListing {
                page: Page::new(Vec::new(), window),
                sports: all_sports,
                selected_sport: None,
                filter,
            });
        }

        let query = MatchQuery {
            sport_id: selected_sport.as_ref().map(|s| s.id),
            window: filter,
            now: normalize_instant(OffsetDateTime::now_utc()),
        };
        let total = matches::count_matches(conn, &query).await?;
        let window = page.window(total, MATCHES_PAGE_SIZE);
        let rows = matches::list_page(conn, &query, window.offset, window.page_size).await?;
        let items = self.hydrate(conn, rows, query.now).await?;

        Ok(MatchListing {
            page: Page::new(items, window),
            sports: all_sports,
            selected_sport,
            filter,
        })
    }

    /// Every match, newest first.
    pub async fn list_all<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Match>, DomainError> {
        matches::list_matches(conn).await
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        match_id: i64,
    ) -> Result<Match, DomainError> {
        matches::require_match(conn, match_id).await
    }

    pub async fn detail<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        match_id: i64,
    ) -> Result<MatchView, DomainError> {
        let record = matches::require_match(conn, match_id).await?;
        let now = normalize_instant(OffsetDateTime::now_utc());
        let mut views = self.hydrate(conn, vec![record], now).await?;
        views.pop().ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
        })
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        input: MatchInput,
    ) -> Result<Match, DomainError> {
        let write = self.validate(conn, &input).await?;
        let created_at = normalize_instant(OffsetDateTime::now_utc());
        let record = matches::create_match(conn, write, created_at).await?;
        info!(
            match_id = record.id,
            home_team_id = record.home_team_id,
            away_team_id = record.away_team_id,
            "Created match"
        );
        Ok(record)
    }

    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        match_id: i64,
        input: MatchInput,
    ) -> Result<Match, DomainError> {
        matches::require_match(conn, match_id).await?;
        let write = self.validate(conn, &input).await?;
        let record = matches::update_match(conn, match_id, write).await?;
        info!(match_id = record.id, status = record.status.as_str(), "Updated match");
        Ok(record)
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        match_id: i64,
    ) -> Result<(), DomainError> {
        matches::delete_match(conn, match_id).await?;
        info!(match_id, "Deleted match");
        Ok(())
    }

    /// Field checks, then existence of the sport and both teams, then the
    /// pairing rules. Pairing only runs once both teams are known.
    async fn validate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        input: &MatchInput,
    ) -> Result<MatchWrite, DomainError> {
        let mut errors = FieldErrors::new();

        let location = input.location.trim().to_string();
        errors.check_max_len("location", &location, LOCATION_MAX);

        let mut score = |field: &str, value: Option<i64>| {
            value.and_then(|n| {
                errors.check_range(field, n, 0, SCORE_MAX);
                i16::try_from(n).ok().filter(|n| *n >= 0)
            })
        };
        let home_score = score("home_score", input.home_score);
        let away_score = score("away_score", input.away_score);

        let notes = input
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if let Some(sport_id) = input.sport_id {
            if sports::find_sport(conn, sport_id).await?.is_none() {
                errors.add("sport", msg::INVALID_CHOICE);
            }
        }

        let team_ids = dedup_ids(&[input.home_team_id, input.away_team_id]);
        let known = teams::find_teams(conn, &team_ids).await?;
        if !known.contains_key(&input.home_team_id) {
            errors.add("home_team", msg::INVALID_CHOICE);
        }
        if !known.contains_key(&input.away_team_id) {
            errors.add("away_team", msg::INVALID_CHOICE);
        }

        if !errors.has("home_team") && !errors.has("away_team") {
            let sports_by_team = teams::sports_by_team(conn, &team_ids).await?;
            let ids_of = |team_id: i64| -> Vec<i64> {
                sports_by_team
                    .get(&team_id)
                    .map(|s| s.iter().map(|s| s.id).collect())
                    .unwrap_or_default()
            };
            let (home_sports, away_sports) = (ids_of(input.home_team_id), ids_of(input.away_team_id));
            let sport_id = input.sport_id.filter(|_| !errors.has("sport"));
            errors.merge(check_pairing(
                sport_id,
                Side {
                    team_id: input.home_team_id,
                    sports: &home_sports,
                },
                Side {
                    team_id: input.away_team_id,
                    sports: &away_sports,
                },
            ));
        }

        reject_if_any("match", errors)?;

        Ok(MatchWrite {
            sport_id: input.sport_id,
            home_team_id: input.home_team_id,
            away_team_id: input.away_team_id,
            date_time: normalize_instant(input.date_time),
            location,
            status: input.status,
            home_score,
            away_score,
            notes,
        })
    }

    /// Resolve sport and teams for a batch of matches with two queries.
    async fn hydrate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rows: Vec<Match>,
        now: OffsetDateTime,
    ) -> Result<Vec<MatchView>, DomainError> {
        let sport_ids = dedup_ids(&rows.iter().filter_map(|m| m.sport_id).collect::<Vec<_>>());
        let team_ids = dedup_ids(
            &rows
                .iter()
                .flat_map(|m| [m.home_team_id, m.away_team_id])
                .collect::<Vec<_>>(),
        );

        let sports_by_id: HashMap<i64, Sport> = sports::find_sports(conn, &sport_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let teams_by_id = teams::find_teams(conn, &team_ids).await?;

        Ok(rows
            .into_iter()
            .map(|record| {
                let home_team = teams_by_id.get(&record.home_team_id).cloned();
                let away_team = teams_by_id.get(&record.away_team_id).cloned();
                let label = match_label(
                    home_team.as_ref().map_or("", |t| t.name.as_str()),
                    away_team.as_ref().map_or("", |t| t.name.as_str()),
                    record.date_time,
                );
                MatchView {
                    sport: record.sport_id.and_then(|id| sports_by_id.get(&id).cloned()),
                    winner: record.winner(),
                    is_past: record.is_past(now),
                    label,
                    home_team,
                    away_team,
                    record,
                }
            })
            .collect())
    }
}

impl Default for MatchService {
    fn default() -> Self {
        Self::new()
    }
}
