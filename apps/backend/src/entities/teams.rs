use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub city: String,
    pub founded: Option<i32>,
    pub logo: Option<String>,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_name = "sport_id")]
    pub sport_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Optional primary sport; the full set lives in `team_sports`.
    #[sea_orm(
        belongs_to = "super::sports::Entity",
        from = "Column::SportId",
        to = "super::sports::Column::Id",
        on_delete = "SetNull"
    )]
    PrimarySport,
    #[sea_orm(has_many = "super::team_sports::Entity")]
    TeamSports,
    #[sea_orm(has_many = "super::players::Entity")]
    Players,
}

impl Related<super::team_sports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamSports.def()
    }
}

impl Related<super::sports::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_sports::Relation::Sport.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_sports::Relation::Team.def().rev())
    }
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
