//! Field-level validation errors collected by forms and services.

use std::collections::BTreeMap;

use serde::Serialize;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Field name -> messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-error shorthand.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Move messages reported under `from` to `to` (API field names differ from form names).
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(messages) = self.0.remove(from) {
            self.0.entry(to.to_string()).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was collected, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// One-line summary for logs and the problem `detail`.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, messages)| {
                let joined = messages.join(" ");
                if field == NON_FIELD_ERRORS {
                    joined
                } else {
                    format!("{field}: {joined}")
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// User-facing validation messages.
pub mod msg {
    pub const REQUIRED: &str = "This field is required.";
    pub const INVALID_CHOICE: &str =
        "Select a valid choice. That choice is not one of the available choices.";
    pub const WHOLE_NUMBER: &str = "Enter a whole number.";
    pub const INVALID_DATE: &str = "Enter a valid date.";
    pub const INVALID_DATETIME: &str = "Enter a valid date/time.";
    pub const VALID_INTEGER: &str = "A valid integer is required.";
    pub const VALID_STRING: &str = "Not a valid string.";
    pub const EXPECTED_LIST: &str = "Expected a list of items.";
    pub const INCORRECT_TYPE: &str = "Incorrect type.";
    pub const EXPECTED_OBJECT: &str = "Invalid data. Expected an object.";
    pub const INVALID_SLUG: &str =
        "Enter a valid slug consisting of letters, numbers, underscores or hyphens.";

    pub fn max_length(max: usize, actual: usize) -> String {
        format!("Ensure this value has at most {max} characters (it has {actual}).")
    }

    pub fn min_value(min: i64) -> String {
        format!("Ensure this value is greater than or equal to {min}.")
    }

    pub fn max_value(max: i64) -> String {
        format!("Ensure this value is less than or equal to {max}.")
    }

    pub fn invalid_choice_value(value: &str) -> String {
        format!("Select a valid choice. {value} is not one of the available choices.")
    }

    pub fn already_exists(model: &str, field: &str) -> String {
        format!("{model} with this {field} already exists.")
    }
}

impl FieldErrors {
    /// Required, trimmed, at most `max` characters. Returns the trimmed value.
    pub fn require_text(&mut self, field: &str, value: &str, max: usize) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, msg::REQUIRED);
        } else {
            self.check_max_len(field, value, max);
        }
        value.to_string()
    }

    pub fn check_max_len(&mut self, field: &str, value: &str, max: usize) {
        let len = value.chars().count();
        if len > max {
            self.add(field, msg::max_length(max, len));
        }
    }

    /// Inclusive range check, reporting the violated bound.
    pub fn check_range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min {
            self.add(field, msg::min_value(min));
        } else if value > max {
            self.add(field, msg::max_value(max));
        }
    }
}
