//! Sport repository functions.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::sports_sea as sports_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sport {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

pub async fn list_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Sport>, DomainError> {
    let rows = sports_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Sport::from).collect())
}

pub async fn find_sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<Option<Sport>, DomainError> {
    Ok(sports_adapter::find_by_id(conn, sport_id).await?.map(Sport::from))
}

pub async fn require_sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<Sport, DomainError> {
    find_sport(conn, sport_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Sport, format!("Sport {sport_id} not found"))
    })
}

pub async fn find_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<Sport>, DomainError> {
    let rows = sports_adapter::find_by_ids(conn, ids).await?;
    Ok(rows.into_iter().map(Sport::from).collect())
}

pub async fn find_sport_by_slug<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
) -> Result<Option<Sport>, DomainError> {
    Ok(sports_adapter::find_by_slug_ci(conn, slug).await?.map(Sport::from))
}

pub async fn name_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<bool, DomainError> {
    Ok(sports_adapter::find_by_name(conn, name).await?.is_some())
}

pub async fn taken_slugs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
    exclude_id: Option<i64>,
) -> Result<HashSet<String>, DomainError> {
    let slugs = sports_adapter::taken_slugs(conn, prefix, exclude_id).await?;
    Ok(slugs.into_iter().collect())
}

pub async fn create_sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    slug: &str,
) -> Result<Sport, DomainError> {
    let dto = sports_adapter::SportCreate::new(name, slug);
    Ok(Sport::from(sports_adapter::create_sport(conn, dto).await?))
}

/// `NotFound(Sport)` when nothing was deleted.
pub async fn delete_sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<(), DomainError> {
    match sports_adapter::delete_sport(conn, sport_id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Sport,
            format!("Sport {sport_id} not found"),
        )),
        _ => Ok(()),
    }
}

impl From<crate::entities::sports::Model> for Sport {
    fn from(model: crate::entities::sports::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}
