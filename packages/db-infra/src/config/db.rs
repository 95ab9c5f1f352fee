//! Database connection configuration resolved from the environment.
//!
//! Everything here is synchronous and side-effect free apart from reading
//! environment variables, so both the backend and the migration CLI can
//! share one definition of "which database, as whom, with what settings".

use std::env;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use sea_orm::DatabaseBackend;

use crate::error::DbInfraError;

/// Which deployment the process is running as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Test,
}

impl FromStr for RuntimeEnv {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(RuntimeEnv::Prod),
            "test" => Ok(RuntimeEnv::Test),
            other => Err(DbInfraError::config(format!(
                "unknown runtime env '{other}' (expected 'prod' or 'test')"
            ))),
        }
    }
}

/// Storage engine behind the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "unknown db kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl From<DbKind> for DatabaseBackend {
    fn from(kind: DbKind) -> Self {
        match kind {
            DbKind::Postgres => DatabaseBackend::Postgres,
            DbKind::SqliteFile | DbKind::SqliteMemory => DatabaseBackend::Sqlite,
        }
    }
}

/// Role used to connect. Migrations run as the owner, requests as the app user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    App,
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPurpose {
    Runtime,
    Migration,
}

/// Per-connection session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbSettings {
    Sqlite {
        busy_timeout_ms: u64,
    },
    Postgres {
        app_name: String,
        statement_timeout: String,
        idle_in_transaction_timeout: String,
        lock_timeout: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
    pub db_settings: DbSettings,
}

const APP_NAME: &str = "league";
const SQLITE_DEFAULT_DIR: &str = "./data";

fn must_var(name: &str) -> Result<String, DbInfraError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DbInfraError::config(format!(
            "missing required environment variable {name}"
        ))),
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_u32_var(name: &str) -> Result<Option<u32>, DbInfraError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| DbInfraError::config(format!("{name} must be a non-negative integer"))),
        _ => Ok(None),
    }
}

fn db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let name = must_var("TEST_DB")?;
            if !name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{name}'"
                )));
            }
            Ok(name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("LEAGUE_OWNER_USER")?,
            must_var("LEAGUE_OWNER_PASSWORD")?,
        )),
    }
}

/// Path of the SQLite database file for `env`.
pub fn sqlite_file_spec(db_kind: DbKind, env: RuntimeEnv) -> Result<String, DbInfraError> {
    if db_kind != DbKind::SqliteFile {
        return Err(DbInfraError::config(
            "sqlite_file_spec only applies to the sqlite-file db kind",
        ));
    }
    let dir = var_or("SQLITE_DB_DIR", SQLITE_DEFAULT_DIR);
    let file = match env {
        RuntimeEnv::Prod => "league.db",
        RuntimeEnv::Test => "league_test.db",
    };
    Ok(format!("{}/{}", dir.trim_end_matches('/'), file))
}

/// Connection string for the given environment, engine and role.
pub fn make_conn_spec(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, DbInfraError> {
    match db_kind {
        DbKind::Postgres => {
            let host = var_or("POSTGRES_HOST", "localhost");
            let port = var_or("POSTGRES_PORT", "5432");
            let name = db_name(env)?;
            let (user, password) = credentials(owner)?;
            let user = utf8_percent_encode(&user, NON_ALPHANUMERIC);
            let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);
            Ok(format!(
                "postgresql://{user}:{password}@{host}:{port}/{name}"
            ))
        }
        DbKind::SqliteFile => Ok(format!(
            "sqlite://{}?mode=rwc",
            sqlite_file_spec(db_kind, env)?
        )),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Fail fast on configurations that cannot work before any connection is attempted.
pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), DbInfraError> {
    match db_kind {
        DbKind::Postgres => {
            db_name(env)?;
            credentials(DbOwner::App)?;
            credentials(DbOwner::Owner)?;
        }
        DbKind::SqliteFile => {
            sqlite_file_spec(db_kind, env)?;
        }
        DbKind::SqliteMemory => {
            if env == RuntimeEnv::Prod {
                return Err(DbInfraError::config(
                    "sqlite-memory is only supported in the test environment",
                ));
            }
        }
    }
    Ok(())
}

/// Pool sizing and session settings for a pool of the given purpose.
///
/// In-memory SQLite always gets exactly one connection: every connection
/// to `sqlite::memory:` is a separate database.
pub fn build_connection_settings(
    env: RuntimeEnv,
    db_kind: DbKind,
    purpose: PoolPurpose,
) -> Result<ConnectionSettings, DbInfraError> {
    let db_settings = match db_kind {
        DbKind::Postgres => DbSettings::Postgres {
            app_name: match purpose {
                PoolPurpose::Runtime => APP_NAME.to_string(),
                PoolPurpose::Migration => format!("{APP_NAME}-migrate"),
            },
            statement_timeout: match purpose {
                PoolPurpose::Runtime => "15s".to_string(),
                PoolPurpose::Migration => "0".to_string(),
            },
            idle_in_transaction_timeout: "60s".to_string(),
            lock_timeout: match purpose {
                PoolPurpose::Runtime => None,
                PoolPurpose::Migration => Some("30s".to_string()),
            },
        },
        DbKind::SqliteFile | DbKind::SqliteMemory => DbSettings::Sqlite {
            busy_timeout_ms: 5000,
        },
    };

    if db_kind == DbKind::SqliteMemory || purpose == PoolPurpose::Migration {
        return Ok(ConnectionSettings {
            pool_min: 1,
            pool_max: 1,
            acquire_timeout_ms: 5000,
            db_settings,
        });
    }

    let (default_min, default_max) = match (db_kind, env) {
        (DbKind::Postgres, RuntimeEnv::Prod) => (2, 10),
        (DbKind::Postgres, RuntimeEnv::Test) => (1, 5),
        _ => (1, 4),
    };
    let pool_min = parse_u32_var("LEAGUE_DB_POOL_MIN")?.unwrap_or(default_min);
    let pool_max = parse_u32_var("LEAGUE_DB_POOL_MAX")?.unwrap_or(default_max);
    if pool_max == 0 || pool_min > pool_max {
        return Err(DbInfraError::config(format!(
            "invalid pool bounds min={pool_min} max={pool_max}"
        )));
    }

    Ok(ConnectionSettings {
        pool_min,
        pool_max,
        acquire_timeout_ms: 5000,
        db_settings,
    })
}

/// Ordered session-level statements run on every new connection.
pub fn build_session_statements(db_kind: DbKind, settings: &DbSettings) -> Vec<String> {
    match (db_kind, settings) {
        (DbKind::SqliteFile | DbKind::SqliteMemory, DbSettings::Sqlite { busy_timeout_ms }) => {
            vec![
                "PRAGMA foreign_keys = ON;".to_string(),
                format!("PRAGMA busy_timeout = {busy_timeout_ms};"),
            ]
        }
        (
            DbKind::Postgres,
            DbSettings::Postgres {
                app_name,
                statement_timeout,
                idle_in_transaction_timeout,
                lock_timeout,
            },
        ) => {
            let mut stmts = vec![
                format!("SET application_name = '{}';", app_name.replace('\'', "''")),
                "SET timezone = 'UTC';".to_string(),
                format!("SET statement_timeout = '{statement_timeout}';"),
                format!("SET idle_in_transaction_session_timeout = '{idle_in_transaction_timeout}';"),
            ];
            if let Some(lock_timeout) = lock_timeout {
                stmts.push(format!("SET lock_timeout = '{lock_timeout}';"));
            }
            stmts
        }
        _ => Vec::new(),
    }
}
