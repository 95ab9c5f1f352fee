use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "POSTPONED")]
    Postponed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl MatchStatus {
    pub const CHOICES: [(MatchStatus, &'static str); 4] = [
        (MatchStatus::Scheduled, "Scheduled"),
        (MatchStatus::Completed, "Completed"),
        (MatchStatus::Postponed, "Postponed"),
        (MatchStatus::Cancelled, "Cancelled"),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::CHOICES
            .iter()
            .map(|(status, _)| *status)
            .find(|status| status.as_str() == raw)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "sport_id")]
    pub sport_id: Option<i64>,
    #[sea_orm(column_name = "home_team_id")]
    pub home_team_id: i64,
    #[sea_orm(column_name = "away_team_id")]
    pub away_team_id: i64,
    #[sea_orm(column_name = "date_time")]
    pub date_time: OffsetDateTime,
    pub location: String,
    pub status: MatchStatus,
    #[sea_orm(column_name = "home_score", column_type = "SmallInteger")]
    pub home_score: Option<i16>,
    #[sea_orm(column_name = "away_score", column_type = "SmallInteger")]
    pub away_score: Option<i16>,
    #[sea_orm(column_type = "Text")]
    pub notes: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sports::Entity",
        from = "Column::SportId",
        to = "super::sports::Column::Id",
        on_delete = "SetNull"
    )]
    Sport,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::HomeTeamId",
        to = "super::teams::Column::Id",
        on_delete = "Cascade"
    )]
    HomeTeam,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::AwayTeamId",
        to = "super::teams::Column::Id",
        on_delete = "Cascade"
    )]
    AwayTeam,
}

impl Related<super::sports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
