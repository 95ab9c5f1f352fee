//! Date and date-time text formats used by forms and the JSON API.
//!
//! Naive date-times (no offset, e.g. from a `datetime-local` input) are
//! taken as UTC.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::domain::matches::normalize_instant;

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// RFC 3339, or a naive `YYYY-MM-DD[T ]HH:MM[:SS]` read as UTC.
/// The result is normalized to UTC whole seconds.
pub fn parse_datetime(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(normalize_instant(at));
    }
    let naive = raw.replacen(' ', "T", 1);
    let with_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let without_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    PrimitiveDateTime::parse(&naive, with_seconds)
        .or_else(|_| PrimitiveDateTime::parse(&naive, without_seconds))
        .ok()
        .map(|dt| normalize_instant(dt.assume_utc()))
}
