use super::{choice_id, required_text, text, whole_number};
use crate::domain::dates::parse_date;
use crate::domain::validation::{msg, FieldErrors};
use crate::extractors::FormData;
use crate::services::players::PlayerInput;

/// Add-player form. `position` is checked against the union vocabulary by
/// the service, whatever sport the chosen team plays.
pub struct PlayerForm;

impl PlayerForm {
    pub fn clean(form: &FormData) -> Result<PlayerInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let date_of_birth = match form.get("date_of_birth").map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    errors.add("date_of_birth", msg::INVALID_DATE);
                }
                parsed
            }
            _ => None,
        };

        let input = PlayerInput {
            first_name: required_text(form, &mut errors, "first_name"),
            last_name: text(form, "last_name"),
            team_id: choice_id(form, &mut errors, "team"),
            position: required_text(form, &mut errors, "position"),
            number: whole_number(form, &mut errors, "number"),
            date_of_birth,
            nationality: text(form, "nationality"),
        };
        errors.into_result().map(|()| input)
    }
}
