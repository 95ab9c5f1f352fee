//! DTOs for players_sea adapter.

use time::Date;

#[derive(Debug, Clone)]
pub struct PlayerWrite {
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<i64>,
    pub position: String,
    pub number: Option<i16>,
    pub date_of_birth: Option<Date>,
    pub nationality: String,
}
