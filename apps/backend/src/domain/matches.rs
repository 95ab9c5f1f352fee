//! Match rules that do not need the store: pairing checks, winner,
//! past/upcoming and the display label.

use serde::Serialize;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::domain::validation::FieldErrors;

pub const SAME_TEAM_MSG: &str = "Away team must be different from home team.";
pub const HOME_NOT_IN_SPORT_MSG: &str = "Home team does not play this sport.";
pub const AWAY_NOT_IN_SPORT_MSG: &str = "Away team does not play this sport.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Home,
    Away,
    Draw,
}

/// `None` until both scores are recorded.
pub fn winner(home_score: Option<i16>, away_score: Option<i16>) -> Option<Winner> {
    let (home, away) = (home_score?, away_score?);
    Some(match home.cmp(&away) {
        std::cmp::Ordering::Greater => Winner::Home,
        std::cmp::Ordering::Less => Winner::Away,
        std::cmp::Ordering::Equal => Winner::Draw,
    })
}

/// Strictly before `now`; a match starting exactly now is still upcoming.
pub fn is_past(date_time: OffsetDateTime, now: OffsetDateTime) -> bool {
    date_time < now
}

/// UTC, whole seconds. Applied to every stored kickoff time.
pub fn normalize_instant(at: OffsetDateTime) -> OffsetDateTime {
    let utc = at.to_offset(UtcOffset::UTC);
    utc.replace_nanosecond(0).unwrap_or(utc)
}

/// `"<home> vs <away> — <YYYY-MM-DD>"`.
pub fn match_label(home: &str, away: &str, date_time: OffsetDateTime) -> String {
    let date = date_time
        .to_offset(UtcOffset::UTC)
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default();
    format!("{home} vs {away} — {date}")
}

/// Sport membership of one side of a match.
#[derive(Debug, Clone, Copy)]
pub struct Side<'a> {
    pub team_id: i64,
    /// The team's declared sport set; empty means "any sport".
    pub sports: &'a [i64],
}

/// Cross-field checks run before any match is written.
///
/// Same-team is reported on `away_team`; a sport mismatch is reported on the
/// side that does not play it. When the teams are the same the sport check
/// is skipped.
pub fn check_pairing(sport_id: Option<i64>, home: Side<'_>, away: Side<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if home.team_id == away.team_id {
        errors.add("away_team", SAME_TEAM_MSG);
        return errors;
    }

    if let Some(sport_id) = sport_id {
        if !home.sports.is_empty() && !home.sports.contains(&sport_id) {
            errors.add("home_team", HOME_NOT_IN_SPORT_MSG);
        }
        if !away.sports.is_empty() && !away.sports.contains(&sport_id) {
            errors.add("away_team", AWAY_NOT_IN_SPORT_MSG);
        }
    }

    errors
}
