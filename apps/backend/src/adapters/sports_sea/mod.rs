//! SeaORM adapter for sports - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::sports;

pub mod dto;

pub use dto::SportCreate;

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<sports::Model>, sea_orm::DbErr> {
    sports::Entity::find()
        .order_by_asc(sports::Column::Name)
        .order_by_asc(sports::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<Option<sports::Model>, sea_orm::DbErr> {
    sports::Entity::find_by_id(sport_id).one(conn).await
}

/// Batched lookup; missing ids are simply absent from the result.
pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<sports::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sports::Entity::find()
        .filter(sports::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(sports::Column::Name)
        .all(conn)
        .await
}

/// Case-insensitive slug match.
pub async fn find_by_slug_ci<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
) -> Result<Option<sports::Model>, sea_orm::DbErr> {
    sports::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(sports::Column::Slug))).eq(slug.to_lowercase()))
        .order_by_asc(sports::Column::Id)
        .one(conn)
        .await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<sports::Model>, sea_orm::DbErr> {
    sports::Entity::find()
        .filter(sports::Column::Name.eq(name))
        .one(conn)
        .await
}

/// Slugs starting with `prefix`, in one query.
pub async fn taken_slugs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
    exclude_id: Option<i64>,
) -> Result<Vec<String>, sea_orm::DbErr> {
    let mut query = sports::Entity::find()
        .select_only()
        .column(sports::Column::Slug)
        .filter(sports::Column::Slug.starts_with(prefix));
    if let Some(id) = exclude_id {
        query = query.filter(sports::Column::Id.ne(id));
    }
    query.into_tuple::<String>().all(conn).await
}

pub async fn create_sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SportCreate,
) -> Result<sports::Model, sea_orm::DbErr> {
    let sport = sports::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        slug: Set(dto.slug),
    };
    sport.insert(conn).await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = sports::Entity::delete_by_id(sport_id).exec(conn).await?;
    Ok(result.rows_affected)
}
