use super::{choice_id, optional_text, required_choice_id, text, whole_number};
use crate::domain::dates::parse_datetime;
use crate::domain::validation::{msg, FieldErrors};
use crate::entities::matches::MatchStatus;
use crate::extractors::FormData;
use crate::services::matches::MatchInput;

/// Add-match form. Both teams and the kickoff time are required; a missing
/// `status` means `SCHEDULED`.
pub struct MatchForm;

impl MatchForm {
    pub fn clean(form: &FormData) -> Result<MatchInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let sport_id = choice_id(form, &mut errors, "sport");
        let home_team_id = required_choice_id(form, &mut errors, "home_team");
        let away_team_id = required_choice_id(form, &mut errors, "away_team");

        let date_time = match form.get("date_time").map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let parsed = parse_datetime(raw);
                if parsed.is_none() {
                    errors.add("date_time", msg::INVALID_DATETIME);
                }
                parsed
            }
            _ => {
                errors.add("date_time", msg::REQUIRED);
                None
            }
        };

        let status = match form.get("status").map(str::trim) {
            None => MatchStatus::default(),
            Some("") => {
                errors.add("status", msg::REQUIRED);
                MatchStatus::default()
            }
            Some(raw) => MatchStatus::parse(raw).unwrap_or_else(|| {
                errors.add("status", msg::invalid_choice_value(raw));
                MatchStatus::default()
            }),
        };

        let home_score = whole_number(form, &mut errors, "home_score");
        let away_score = whole_number(form, &mut errors, "away_score");

        match (home_team_id, away_team_id, date_time) {
            (Some(home_team_id), Some(away_team_id), Some(date_time)) if errors.is_empty() => {
                Ok(MatchInput {
                    sport_id,
                    home_team_id,
                    away_team_id,
                    date_time,
                    location: text(form, "location"),
                    status,
                    home_score,
                    away_score,
                    notes: optional_text(form, "notes"),
                })
            }
            _ => Err(errors),
        }
    }
}
