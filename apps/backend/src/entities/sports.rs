use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_sports::Entity")]
    TeamSports,
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::team_sports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamSports.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_sports::Relation::Team.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_sports::Relation::Sport.def().rev())
    }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
