//! DTOs for matches_sea adapter.

use time::OffsetDateTime;

use crate::domain::listing::TemporalFilter;
use crate::entities::matches::MatchStatus;

#[derive(Debug, Clone)]
pub struct MatchWrite {
    pub sport_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    /// UTC, whole seconds.
    pub date_time: OffsetDateTime,
    pub location: String,
    pub status: MatchStatus,
    pub home_score: Option<i16>,
    pub away_score: Option<i16>,
    pub notes: Option<String>,
}

/// Filters for the matches listing, evaluated against a fixed `now`.
#[derive(Debug, Clone, Copy)]
pub struct MatchQuery {
    pub sport_id: Option<i64>,
    pub window: TemporalFilter,
    pub now: OffsetDateTime,
}
