//! SeaORM adapter for matches.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::listing::TemporalFilter;
use crate::entities::matches;

pub mod dto;

pub use dto::{MatchQuery, MatchWrite};

fn filtered(query: &MatchQuery) -> Select<matches::Entity> {
    let mut select = matches::Entity::find();
    if let Some(sport_id) = query.sport_id {
        select = select.filter(matches::Column::SportId.eq(sport_id));
    }
    match query.window {
        TemporalFilter::Upcoming => select
            .filter(matches::Column::DateTime.gte(query.now))
            .order_by_asc(matches::Column::DateTime)
            .order_by_asc(matches::Column::Id),
        TemporalFilter::Past => select
            .filter(matches::Column::DateTime.lt(query.now))
            .order_by_desc(matches::Column::DateTime)
            .order_by_desc(matches::Column::Id),
        TemporalFilter::All => select
            .order_by_desc(matches::Column::DateTime)
            .order_by_desc(matches::Column::Id),
    }
}

pub async fn count<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &MatchQuery,
) -> Result<u64, sea_orm::DbErr> {
    filtered(query).count(conn).await
}

pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &MatchQuery,
    offset: u64,
    limit: u64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    filtered(query).offset(offset).limit(limit).all(conn).await
}

/// Every match, newest first.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .order_by_desc(matches::Column::DateTime)
        .order_by_desc(matches::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchWrite,
    created_at: time::OffsetDateTime,
) -> Result<matches::Model, sea_orm::DbErr> {
    let row = matches::ActiveModel {
        id: NotSet,
        sport_id: Set(dto.sport_id),
        home_team_id: Set(dto.home_team_id),
        away_team_id: Set(dto.away_team_id),
        date_time: Set(dto.date_time),
        location: Set(dto.location),
        status: Set(dto.status),
        home_score: Set(dto.home_score),
        away_score: Set(dto.away_score),
        notes: Set(dto.notes),
        created_at: Set(created_at),
    };
    row.insert(conn).await
}

/// Overwrites every writable column; `created_at` is left alone.
pub async fn update_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    dto: MatchWrite,
) -> Result<matches::Model, sea_orm::DbErr> {
    let row = matches::ActiveModel {
        id: Set(match_id),
        sport_id: Set(dto.sport_id),
        home_team_id: Set(dto.home_team_id),
        away_team_id: Set(dto.away_team_id),
        date_time: Set(dto.date_time),
        location: Set(dto.location),
        status: Set(dto.status),
        home_score: Set(dto.home_score),
        away_score: Set(dto.away_score),
        notes: Set(dto.notes),
        created_at: NotSet,
    };
    row.update(conn).await
}

pub async fn delete_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = matches::Entity::delete_by_id(match_id).exec(conn).await?;
    Ok(result.rows_affected)
}
