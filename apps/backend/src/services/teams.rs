//! Team service: validation, slugs, sport associations and read models.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::pagination::{Page, PageRequest, TEAMS_PAGE_SIZE};
use crate::domain::slug::{disambiguate, slug_base, slug_stem, slugify, TEAM_SLUG_FALLBACK};
use crate::domain::validation::{msg, FieldErrors};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::players::{self, Player};
use crate::repos::sports::{self, Sport};
use crate::repos::teams::{self, Team, TeamWrite};
use crate::services::{dedup_ids, reject_if_any};

pub const NAME_MAX: usize = 100;
pub const CITY_MAX: usize = 100;
pub const LOGO_MAX: usize = 255;
pub const SLUG_MAX: usize = 120;

/// Submitted team fields, before any store checks.
#[derive(Debug, Clone, Default)]
pub struct TeamInput {
    pub name: String,
    pub city: String,
    pub founded: Option<i64>,
    pub logo: Option<String>,
    pub slug: Option<String>,
    /// Primary sport.
    pub sport_id: Option<i64>,
    /// Full sport set; replaces the stored set on save.
    pub sport_ids: Vec<i64>,
}

/// A team with its sport set, as listed.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSummary {
    pub team: Team,
    pub sports: Vec<Sport>,
}

/// A team with everything the detail view and API show.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamDetail {
    pub team: Team,
    pub sport: Option<Sport>,
    pub sports: Vec<Sport>,
    pub players: Vec<Player>,
}

pub struct TeamService;

impl TeamService {
    pub fn new() -> Self {
        Self
    }

    /// Teams by name, one page, sports loaded in a single batched query.
    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: PageRequest,
    ) -> Result<Page<TeamSummary>, DomainError> {
        let total = teams::count_teams(conn).await?;
        let window = page.window(total, TEAMS_PAGE_SIZE);
        let rows = teams::list_page(conn, window.offset, window.page_size).await?;

        let ids: Vec<i64> = rows.iter().map(|t| t.id).collect();
        let mut sports_by_team = teams::sports_by_team(conn, &ids).await?;

        let items = rows
            .into_iter()
            .map(|team| TeamSummary {
                sports: sports_by_team.remove(&team.id).unwrap_or_default(),
                team,
            })
            .collect();
        Ok(Page::new(items, window))
    }

    /// All teams by name with their sport sets (form choices).
    pub async fn list_with_sports<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<TeamSummary>, DomainError> {
        let rows = teams::list_teams(conn).await?;
        let ids: Vec<i64> = rows.iter().map(|t| t.id).collect();
        let mut sports_by_team = teams::sports_by_team(conn, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|team| TeamSummary {
                sports: sports_by_team.remove(&team.id).unwrap_or_default(),
                team,
            })
            .collect())
    }

    /// Every team in full, with batched sport and player lookups.
    pub async fn list_details<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<TeamDetail>, DomainError> {
        let rows = teams::list_teams(conn).await?;
        self.hydrate(conn, rows).await
    }

    pub async fn detail<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i64,
    ) -> Result<TeamDetail, DomainError> {
        let team = teams::require_team(conn, team_id).await?;
        let mut details = self.hydrate(conn, vec![team]).await?;
        details.pop().ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
        })
    }

    /// Create the team and its sport set. Callers run this inside one
    /// transaction so the two writes land together.
    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        input: TeamInput,
    ) -> Result<TeamDetail, DomainError> {
        let (write, sport_ids) = self.validate(conn, &input, None, None).await?;

        let team = teams::create_team(conn, write).await?;
        teams::replace_sports(conn, team.id, &sport_ids).await?;
        info!(team_id = team.id, slug = %team.slug, sports = sport_ids.len(), "Created team");

        self.detail(conn, team.id).await
    }

    /// Full update; the sport set is replaced.
    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i64,
        input: TeamInput,
    ) -> Result<TeamDetail, DomainError> {
        let existing = teams::require_team(conn, team_id).await?;
        let (write, sport_ids) = self
            .validate(conn, &input, Some(team_id), Some(&existing.slug))
            .await?;

        let team = teams::update_team(conn, team_id, write).await?;
        teams::replace_sports(conn, team.id, &sport_ids).await?;
        info!(team_id = team.id, slug = %team.slug, sports = sport_ids.len(), "Updated team");

        self.detail(conn, team.id).await
    }

    /// Current values of a team as an input, for partial updates.
    pub async fn current_input<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i64,
    ) -> Result<TeamInput, DomainError> {
        let detail = self.detail(conn, team_id).await?;
        Ok(TeamInput {
            name: detail.team.name,
            city: detail.team.city,
            founded: detail.team.founded.map(i64::from),
            logo: detail.team.logo,
            slug: Some(detail.team.slug),
            sport_id: detail.team.sport_id,
            sport_ids: detail.sports.iter().map(|s| s.id).collect(),
        })
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i64,
    ) -> Result<(), DomainError> {
        teams::delete_team(conn, team_id).await?;
        info!(team_id, "Deleted team");
        Ok(())
    }

    /// Field checks, then store checks (name, sports), then the slug.
    ///
    /// Slug base: explicit slug, else the stored slug on update, else the name.
    async fn validate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        input: &TeamInput,
        exclude_id: Option<i64>,
        current_slug: Option<&str>,
    ) -> Result<(TeamWrite, Vec<i64>), DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.require_text("name", &input.name, NAME_MAX);
        let city = input.city.trim().to_string();
        errors.check_max_len("city", &city, CITY_MAX);

        let founded = match input.founded {
            Some(year) => {
                errors.check_range("founded", year, 0, i64::from(i32::MAX));
                i32::try_from(year).ok()
            }
            None => None,
        };

        let logo = input
            .logo
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if let Some(logo) = &logo {
            errors.check_max_len("logo", logo, LOGO_MAX);
        }

        let explicit_slug = input
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(raw) = explicit_slug {
            errors.check_max_len("slug", raw, SLUG_MAX);
            if slugify(raw).is_empty() {
                errors.add("slug", msg::INVALID_SLUG);
            }
        }

        if !errors.has("name") && teams::name_taken(conn, &name, exclude_id).await? {
            errors.add("name", msg::already_exists("Team", "Name"));
        }

        if let Some(sport_id) = input.sport_id {
            if sports::find_sport(conn, sport_id).await?.is_none() {
                errors.add("sport", msg::INVALID_CHOICE);
            }
        }

        let sport_ids = dedup_ids(&input.sport_ids);
        if !sport_ids.is_empty() {
            let found: Vec<i64> = sports::find_sports(conn, &sport_ids)
                .await?
                .iter()
                .map(|s| s.id)
                .collect();
            for id in sport_ids.iter().filter(|id| !found.contains(id)) {
                errors.add("sports", msg::invalid_choice_value(&id.to_string()));
            }
        }

        reject_if_any("team", errors)?;

        let base = slug_base(
            explicit_slug.or(current_slug).unwrap_or(&name),
            TEAM_SLUG_FALLBACK,
            SLUG_MAX,
        );
        let taken = teams::taken_slugs(conn, slug_stem(&base, SLUG_MAX), exclude_id).await?;
        let slug = disambiguate(&base, &taken, SLUG_MAX);

        Ok((
            TeamWrite {
                name,
                city,
                founded,
                logo,
                slug,
                sport_id: input.sport_id,
            },
            sport_ids,
        ))
    }

    /// Attach primary sport, sport set and roster with three batched queries.
    async fn hydrate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rows: Vec<Team>,
    ) -> Result<Vec<TeamDetail>, DomainError> {
        let ids: Vec<i64> = rows.iter().map(|t| t.id).collect();
        let mut sports_by_team = teams::sports_by_team(conn, &ids).await?;

        let primary_ids = dedup_ids(&rows.iter().filter_map(|t| t.sport_id).collect::<Vec<_>>());
        let primaries: HashMap<i64, Sport> = sports::find_sports(conn, &primary_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut rosters: HashMap<i64, Vec<Player>> = HashMap::new();
        for player in players::list_by_teams(conn, &ids).await? {
            if let Some(team_id) = player.team_id {
                rosters.entry(team_id).or_default().push(player);
            }
        }

        Ok(rows
            .into_iter()
            .map(|team| TeamDetail {
                sport: team.sport_id.and_then(|id| primaries.get(&id).cloned()),
                sports: sports_by_team.remove(&team.id).unwrap_or_default(),
                players: rosters.remove(&team.id).unwrap_or_default(),
                team,
            })
            .collect())
    }
}

impl Default for TeamService {
    fn default() -> Self {
        Self::new()
    }
}
