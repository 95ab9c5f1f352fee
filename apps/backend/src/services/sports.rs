//! Sport service.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::listing::SportSelector;
use crate::domain::slug::{disambiguate, slug_base, slug_stem, slugify, SPORT_SLUG_FALLBACK};
use crate::domain::validation::{msg, FieldErrors};
use crate::errors::domain::DomainError;
use crate::repos::sports::{self, Sport};
use crate::services::reject_if_any;

pub const NAME_MAX: usize = 80;
pub const SLUG_MAX: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct SportInput {
    pub name: String,
    /// Explicit slug; slugified and disambiguated like a derived one.
    pub slug: Option<String>,
}

pub struct SportService;

impl SportService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Sport>, DomainError> {
        sports::list_sports(conn).await
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        sport_id: i64,
    ) -> Result<Sport, DomainError> {
        sports::require_sport(conn, sport_id).await
    }

    /// Resolve an id-or-slug selector. Unknown sports are `None`.
    pub async fn resolve<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        selector: &SportSelector,
    ) -> Result<Option<Sport>, DomainError> {
        match selector {
            SportSelector::Id(id) => sports::find_sport(conn, *id).await,
            SportSelector::Slug(slug) => sports::find_sport_by_slug(conn, slug).await,
        }
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        input: SportInput,
    ) -> Result<Sport, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.require_text("name", &input.name, NAME_MAX);

        let explicit = input
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(raw) = explicit {
            errors.check_max_len("slug", raw, SLUG_MAX);
            if slugify(raw).is_empty() {
                errors.add("slug", msg::INVALID_SLUG);
            }
        }

        if !errors.has("name") && sports::name_exists(conn, &name).await? {
            errors.add("name", msg::already_exists("Sport", "Name"));
        }
        reject_if_any("sport", errors)?;

        let base = slug_base(explicit.unwrap_or(&name), SPORT_SLUG_FALLBACK, SLUG_MAX);
        let taken = sports::taken_slugs(conn, slug_stem(&base, SLUG_MAX), None).await?;
        let slug = disambiguate(&base, &taken, SLUG_MAX);

        let sport = sports::create_sport(conn, &name, &slug).await?;
        info!(sport_id = sport.id, slug = %sport.slug, "Created sport");
        Ok(sport)
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        sport_id: i64,
    ) -> Result<(), DomainError> {
        sports::delete_sport(conn, sport_id).await?;
        info!(sport_id, "Deleted sport");
        Ok(())
    }
}

impl Default for SportService {
    fn default() -> Self {
        Self::new()
    }
}
