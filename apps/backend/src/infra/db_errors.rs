//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert here and
//! higher layers map `DomainError` to `AppError` via `From`. Both Postgres
//! constraint names and SQLite's "UNIQUE constraint failed: table.col"
//! messages are recognised.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(&format!("SQLSTATE({code})")) || msg.contains(&format!("code: {code}"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

fn is_fk_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23503")
        || msg.contains("violates foreign key constraint")
        || msg.contains("FOREIGN KEY constraint failed")
}

fn is_check_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23514")
        || msg.contains("violates check constraint")
        || msg.contains("CHECK constraint failed")
}

/// Columns named by SQLite in "UNIQUE constraint failed: a.b, a.c".
fn sqlite_unique_columns(msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = msg.find(MARKER)? + MARKER.len();
    let rest = &msg[start..];
    let end = rest.find(['\n', '"', ')']).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

fn unique_conflict_for(msg: &str) -> Option<(ConflictKind, &'static str)> {
    let sqlite = sqlite_unique_columns(msg);
    let hit = |pg_constraint: &str, sqlite_cols: &str| {
        msg.contains(pg_constraint) || sqlite == Some(sqlite_cols)
    };

    if hit("sports_name_key", "sports.name") {
        return Some((ConflictKind::NameTaken, "Sport with this name already exists."));
    }
    if hit("teams_name_key", "teams.name") {
        return Some((ConflictKind::NameTaken, "Team with this name already exists."));
    }
    if hit("sports_slug_key", "sports.slug") || hit("teams_slug_key", "teams.slug") {
        return Some((ConflictKind::SlugTaken, "Slug is already in use."));
    }
    if hit("ux_players_team_number", "players.team_id, players.number") {
        return Some((
            ConflictKind::JerseyNumberTaken,
            "This jersey number is already taken in the team.",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with a client-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Record, format!("Record not found: {what}"));
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        if let Some((kind, detail)) = unique_conflict_for(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(ConflictKind::Unique, "Unique constraint violation");
    }

    if is_fk_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::conflict(
            ConflictKind::ForeignKey,
            "Referenced record does not exist or is still referenced",
        );
    }

    if is_check_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::constraint("Home team and away team must be different");
    }

    if error_msg.contains("statement timeout")
        || error_msg.contains("timed out")
        || error_msg.contains("database is locked")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
