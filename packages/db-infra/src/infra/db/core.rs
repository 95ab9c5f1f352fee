use std::future::Future;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, trace, warn};

use crate::config::db::{
    build_connection_settings, build_session_statements, make_conn_spec, validate_db_config,
    DbKind, DbOwner, DbSettings, PoolPurpose, RuntimeEnv,
};
use crate::error::DbInfraError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry `connect_fn` at a fixed interval, returning the last error once attempts run out.
pub async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::config("no connection attempts were made")))
}

/// Single-connection pool with owner credentials, used for migrations.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;

    let mut opt = ConnectOptions::new(&url);
    opt.min_connections(1)
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(false);

    // only Postgres can be "not up yet"; SQLite is local
    if matches!(db_kind, DbKind::Postgres) {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| {
                        DbInfraError::config(format!(
                            "failed to connect to Postgres (admin pool): {e}"
                        ))
                    })
                }
            },
            5,
            500,
        )
        .await
    } else {
        Database::connect(opt).await.map_err(|e| {
            DbInfraError::config(format!("failed to connect to database (admin pool): {e}"))
        })
    }
}

/// Mask the password in a connection URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    let Some((scheme, userinfo)) = auth_part.split_once("://") else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host_part}"),
        None => url.to_string(),
    }
}

/// Validate config, open an admin pool and run `command` against it.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    validate_db_config(env, db_kind)?;
    let admin_pool = build_admin_pool(env, db_kind).await?;
    orchestrate_migration_internal(&admin_pool, env, db_kind, command).await
}

/// Run `command` on an existing pool and verify the resulting migration count.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let start = Instant::now();
    info!(
        "migrate=start env={:?} db_kind={:?} engine={} command={:?}",
        env,
        db_kind,
        get_db_engine(db_kind),
        command
    );

    if matches!(command, MigrationCommand::Status) {
        migrate(pool, command).await?;
        info!("migrate=done");
        return Ok(());
    }

    if matches!(command, MigrationCommand::Up) && schema_is_current(pool).await? {
        info!("migrate=skipped up_to_date=true");
        return Ok(());
    }

    if matches!(db_kind, DbKind::SqliteFile) {
        setup_sqlite_file_prerequisites(pool).await?;
    }

    let settings = build_connection_settings(env, db_kind, PoolPurpose::Migration)?;
    apply_db_settings(pool, &settings.db_settings, db_kind).await?;

    migrate(pool, command).await?;

    let expected_count = Migrator::migrations().len();
    let applied_count = Migrator::get_applied_migrations(pool).await?.len();
    info!(
        migrate = "counts",
        expected_count,
        applied_count,
        elapsed_ms = start.elapsed().as_millis()
    );

    match command {
        MigrationCommand::Reset if applied_count != 0 => {
            return Err(DbInfraError::config(format!(
                "reset should leave 0 migrations applied, but {applied_count} were found (env={env:?}, db_kind={db_kind:?})"
            )));
        }
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh
            if applied_count != expected_count =>
        {
            return Err(DbInfraError::config(format!(
                "expected {expected_count} migrations, but {applied_count} were applied (env={env:?}, db_kind={db_kind:?})"
            )));
        }
        _ => {}
    }

    info!("migrate=done");
    Ok(())
}

async fn schema_is_current(pool: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected: Vec<String> = Migrator::migrations()
        .iter()
        .map(|m| m.name().to_string())
        .collect();

    match Migrator::get_applied_migrations(pool).await {
        Ok(applied) => {
            let applied: Vec<String> = applied.iter().map(|m| m.name().to_string()).collect();
            let current = applied == expected;
            trace!(
                fastpath = if current { "hit" } else { "miss" },
                applied_count = applied.len(),
                expected_count = expected.len()
            );
            Ok(current)
        }
        // migration table missing or unreadable; let the migrator sort it out
        Err(e) => {
            trace!(fastpath = "miss", error = %e);
            Ok(false)
        }
    }
}

async fn apply_db_settings(
    pool: &DatabaseConnection,
    settings: &DbSettings,
    db_kind: DbKind,
) -> Result<(), DbInfraError> {
    let backend = sea_orm::DatabaseBackend::from(db_kind);
    for stmt in build_session_statements(db_kind, settings) {
        pool.execute(Statement::from_string(backend, stmt))
            .await
            .map_err(|e| DbInfraError::config(format!("failed to apply db settings: {e}")))?;
    }
    Ok(())
}

async fn setup_sqlite_file_prerequisites(pool: &DatabaseConnection) -> Result<(), DbInfraError> {
    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
        pool.execute(Statement::from_string(
            sea_orm::DatabaseBackend::Sqlite,
            pragma,
        ))
        .await
        .map_err(|e| DbInfraError::config(format!("failed to run '{pragma}': {e}")))?;
    }
    Ok(())
}
