use super::{choice_id, choice_ids, optional_text, required_text, text, whole_number};
use crate::domain::validation::FieldErrors;
use crate::extractors::FormData;
use crate::services::teams::TeamInput;

/// Add-team form: `name`, `city`, `founded`, `logo`, `slug`, `sport`,
/// and the repeated `sports` multi-select.
pub struct TeamForm;

impl TeamForm {
    pub fn clean(form: &FormData) -> Result<TeamInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let input = TeamInput {
            name: required_text(form, &mut errors, "name"),
            city: text(form, "city"),
            founded: whole_number(form, &mut errors, "founded"),
            logo: optional_text(form, "logo"),
            slug: optional_text(form, "slug"),
            sport_id: choice_id(form, &mut errors, "sport"),
            sport_ids: choice_ids(form, &mut errors, "sports"),
        };
        errors.into_result().map(|()| input)
    }
}
