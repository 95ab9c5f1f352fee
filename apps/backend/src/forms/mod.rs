//! Form cleaning: raw url-encoded submissions into typed service inputs.
//!
//! Each form collects every parse error before returning, so a rejected
//! submission lists all offending fields at once. Checks that need the
//! store (uniqueness, references, pairing) run afterwards in the services.

pub mod matches;
pub mod player;
pub mod team;

use crate::domain::validation::{msg, FieldErrors};
use crate::extractors::FormData;

pub use matches::MatchForm;
pub use player::PlayerForm;
pub use team::TeamForm;

/// Raw text value; absent keys read as empty.
fn text(form: &FormData, key: &str) -> String {
    form.get(key).unwrap_or_default().to_string()
}

/// Text that must not be blank; the raw value is returned either way.
fn required_text(form: &FormData, errors: &mut FieldErrors, key: &str) -> String {
    let value = text(form, key);
    if value.trim().is_empty() {
        errors.add(key, msg::REQUIRED);
    }
    value
}

/// Optional text; blank reads as `None`.
fn optional_text(form: &FormData, key: &str) -> Option<String> {
    form.get(key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Optional integer field.
fn whole_number(form: &FormData, errors: &mut FieldErrors, key: &str) -> Option<i64> {
    let raw = form.get(key).map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(key, msg::WHOLE_NUMBER);
            None
        }
    }
}

/// Optional single-select of a record id.
fn choice_id(form: &FormData, errors: &mut FieldErrors, key: &str) -> Option<i64> {
    let raw = form.get(key).map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(key, msg::INVALID_CHOICE);
            None
        }
    }
}

/// Required single-select of a record id.
fn required_choice_id(form: &FormData, errors: &mut FieldErrors, key: &str) -> Option<i64> {
    if form.get(key).map(str::trim).filter(|s| !s.is_empty()).is_none() {
        errors.add(key, msg::REQUIRED);
        return None;
    }
    choice_id(form, errors, key)
}

/// Multi-select of record ids; blanks are skipped.
fn choice_ids(form: &FormData, errors: &mut FieldErrors, key: &str) -> Vec<i64> {
    let mut ids = Vec::new();
    for raw in form.get_all(key).into_iter().map(str::trim) {
        if raw.is_empty() {
            continue;
        }
        match raw.parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => errors.add(key, msg::invalid_choice_value(raw)),
        }
    }
    ids
}
