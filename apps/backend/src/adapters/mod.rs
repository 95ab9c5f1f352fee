//! SeaORM adapters. Functions return `DbErr`; repos map to `DomainError`.

pub mod matches_sea;
pub mod players_sea;
pub mod sports_sea;
pub mod teams_sea;
