use std::env;
use std::env::VarError;
use std::str::FromStr;

use league::config::db::{DbKind, RuntimeEnv};
use league::infra::state::{build_state, StateBuilder};
use league::state::app_state::AppState;
use league::AppError;

/// `LEAGUE_TEST_DB_KIND` picks the backend; default is a fresh in-memory
/// SQLite database per state.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match env::var("LEAGUE_TEST_DB_KIND") {
        Ok(raw) => Ok(DbKind::from_str(&raw)?),
        Err(VarError::NotPresent) => Ok(DbKind::SqliteMemory),
        Err(e) => Err(AppError::config(format!(
            "failed to read LEAGUE_TEST_DB_KIND: {e}"
        ))),
    }
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state().with_env(RuntimeEnv::Test).with_db(db_kind))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}
