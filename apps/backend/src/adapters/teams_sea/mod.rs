//! SeaORM adapter for teams and their sport associations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{sports, team_sports, teams};

pub mod dto;

pub use dto::TeamWrite;

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    teams::Entity::find().count(conn).await
}

/// One page of teams ordered by name.
pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .order_by_asc(teams::Column::Name)
        .order_by_asc(teams::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .order_by_asc(teams::Column::Name)
        .order_by_asc(teams::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    teams::Entity::find()
        .filter(teams::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
}

/// Another team already using `name`.
pub async fn find_other_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    let mut query = teams::Entity::find().filter(teams::Column::Name.eq(name));
    if let Some(id) = exclude_id {
        query = query.filter(teams::Column::Id.ne(id));
    }
    query.one(conn).await
}

/// Slugs starting with `prefix`, excluding the team being updated.
pub async fn taken_slugs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
    exclude_id: Option<i64>,
) -> Result<Vec<String>, sea_orm::DbErr> {
    let mut query = teams::Entity::find()
        .select_only()
        .column(teams::Column::Slug)
        .filter(teams::Column::Slug.starts_with(prefix));
    if let Some(id) = exclude_id {
        query = query.filter(teams::Column::Id.ne(id));
    }
    query.into_tuple::<String>().all(conn).await
}

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TeamWrite,
) -> Result<teams::Model, sea_orm::DbErr> {
    let team = teams::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        city: Set(dto.city),
        founded: Set(dto.founded),
        logo: Set(dto.logo),
        slug: Set(dto.slug),
        sport_id: Set(dto.sport_id),
    };
    team.insert(conn).await
}

pub async fn update_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    dto: TeamWrite,
) -> Result<teams::Model, sea_orm::DbErr> {
    let team = teams::ActiveModel {
        id: Set(team_id),
        name: Set(dto.name),
        city: Set(dto.city),
        founded: Set(dto.founded),
        logo: Set(dto.logo),
        slug: Set(dto.slug),
        sport_id: Set(dto.sport_id),
    };
    team.update(conn).await
}

pub async fn delete_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = teams::Entity::delete_by_id(team_id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// `(team_id, sport)` for every association of the given teams, sports by name.
pub async fn sports_for_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<(i64, sports::Model)>, sea_orm::DbErr> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = team_sports::Entity::find()
        .filter(team_sports::Column::TeamId.is_in(team_ids.iter().copied()))
        .find_also_related(sports::Entity)
        .order_by_asc(sports::Column::Name)
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(link, sport)| sport.map(|s| (link.team_id, s)))
        .collect())
}

/// Replace a team's sport set with exactly `sport_ids` (deduplicated by the caller).
pub async fn replace_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    sport_ids: &[i64],
) -> Result<(), sea_orm::DbErr> {
    team_sports::Entity::delete_many()
        .filter(team_sports::Column::TeamId.eq(team_id))
        .exec(conn)
        .await?;

    if sport_ids.is_empty() {
        return Ok(());
    }

    let rows = sport_ids.iter().map(|sport_id| team_sports::ActiveModel {
        team_id: Set(team_id),
        sport_id: Set(*sport_id),
    });
    team_sports::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
