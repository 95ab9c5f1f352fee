//! SeaORM adapter for players.

use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{players, teams};

pub mod dto;

pub use dto::PlayerWrite;

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    players::Entity::find().count(conn).await
}

/// One page of players joined to their team.
///
/// Ordered by team name, number, last name; players without a team and
/// without a number sort last within their level.
pub async fn list_page_with_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<(players::Model, Option<teams::Model>)>, sea_orm::DbErr> {
    players::Entity::find()
        .find_also_related(teams::Entity)
        .order_by_with_nulls(teams::Column::Name, Order::Asc, NullOrdering::Last)
        .order_by_with_nulls(players::Column::Number, Order::Asc, NullOrdering::Last)
        .order_by_asc(players::Column::LastName)
        .order_by_asc(players::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn find_with_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<(players::Model, Option<teams::Model>)>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id)
        .find_also_related(teams::Entity)
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

/// Roster order: number (unnumbered last), then last name.
pub async fn list_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::TeamId.eq(team_id))
        .order_by_with_nulls(players::Column::Number, Order::Asc, NullOrdering::Last)
        .order_by_asc(players::Column::LastName)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }
    players::Entity::find()
        .filter(players::Column::TeamId.is_in(team_ids.iter().copied()))
        .order_by_with_nulls(players::Column::Number, Order::Asc, NullOrdering::Last)
        .order_by_asc(players::Column::LastName)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

/// Whether another player on `team_id` already wears `number`.
pub async fn number_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    number: i16,
    exclude_id: Option<i64>,
) -> Result<bool, sea_orm::DbErr> {
    let mut query = players::Entity::find()
        .filter(players::Column::TeamId.eq(team_id))
        .filter(players::Column::Number.eq(number));
    if let Some(id) = exclude_id {
        query = query.filter(players::Column::Id.ne(id));
    }
    Ok(query.count(conn).await? > 0)
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerWrite,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = players::ActiveModel {
        id: NotSet,
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        team_id: Set(dto.team_id),
        position: Set(dto.position),
        number: Set(dto.number),
        date_of_birth: Set(dto.date_of_birth),
        nationality: Set(dto.nationality),
    };
    player.insert(conn).await
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    dto: PlayerWrite,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = players::ActiveModel {
        id: Set(player_id),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        team_id: Set(dto.team_id),
        position: Set(dto.position),
        number: Set(dto.number),
        date_of_birth: Set(dto.date_of_birth),
        nationality: Set(dto.nationality),
    };
    player.update(conn).await
}

pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::delete_by_id(player_id).exec(conn).await?;
    Ok(result.rows_affected)
}
