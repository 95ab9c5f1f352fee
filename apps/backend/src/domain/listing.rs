//! Query-string selectors for the matches listing and the add-team form.

use serde::Serialize;

/// Temporal window of the matches listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalFilter {
    /// `date_time >= now`, soonest first.
    #[default]
    Upcoming,
    /// `date_time < now`, most recent first.
    Past,
    /// Everything, most recent first.
    All,
}

impl TemporalFilter {
    /// Unrecognised or missing values fall back to `Upcoming`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("past") => Self::Past,
            Some("all") => Self::All,
            _ => Self::Upcoming,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Past => "past",
            Self::All => "all",
        }
    }
}

/// A sport picked by numeric id or by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SportSelector {
    Id(i64),
    /// Compared case-insensitively.
    Slug(String),
}

impl SportSelector {
    /// All-digit values are ids; anything else non-empty is a slug.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = raw.parse::<i64>() {
                return Some(Self::Id(id));
            }
        }
        Some(Self::Slug(raw.to_lowercase()))
    }
}
