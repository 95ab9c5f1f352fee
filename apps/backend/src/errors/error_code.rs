//! Error codes for the league API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Every code
//! is SCREAMING_SNAKE_CASE and maps 1:1 to the `code` field of a problem
//! details response.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// One or more fields failed validation; details in `errors`
    ValidationError,
    /// Malformed body, path or query
    BadRequest,
    /// Non-numeric or out-of-range id in the path
    InvalidId,

    // Resource not found
    SportNotFound,
    TeamNotFound,
    PlayerNotFound,
    MatchNotFound,
    /// Unmatched route
    NotFound,
    /// Generic DB-driven not found
    RecordNotFound,

    // Conflicts detected by the store
    NameTaken,
    SlugConflict,
    JerseyNumberTaken,
    /// Unique constraint violation (SQLSTATE 23505)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514)
    CheckViolation,
    Conflict,

    // System
    DbError,
    DbUnavailable,
    /// Statement or pool timeout (504)
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",

            Self::SportNotFound => "SPORT_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::NameTaken => "NAME_TAKEN",
            Self::SlugConflict => "SLUG_CONFLICT",
            Self::JerseyNumberTaken => "JERSEY_NUMBER_TAKEN",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for exhaustiveness checks in tests.
    pub const ALL: [ErrorCode; 21] = [
        Self::ValidationError,
        Self::BadRequest,
        Self::InvalidId,
        Self::SportNotFound,
        Self::TeamNotFound,
        Self::PlayerNotFound,
        Self::MatchNotFound,
        Self::NotFound,
        Self::RecordNotFound,
        Self::NameTaken,
        Self::SlugConflict,
        Self::JerseyNumberTaken,
        Self::UniqueViolation,
        Self::FkViolation,
        Self::CheckViolation,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
