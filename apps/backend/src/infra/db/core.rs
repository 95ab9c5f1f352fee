use std::process;
use std::str::FromStr;
use std::time::Duration;

use db_infra::infra::db::{build_admin_pool, orchestrate_migration_internal, sanitize_db_url};
use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace};

use super::{DbKind, DbOwner, RuntimeEnv};
use crate::config::db::{
    build_connection_settings, build_session_statements, make_conn_spec, validate_db_config,
    ConnectionSettings, DbSettings, PoolPurpose,
};
use crate::error::AppError;

async fn apply_sqlite_config(
    conn: &mut sqlx::SqliteConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(DbKind::SqliteMemory, settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

async fn apply_postgres_config(
    conn: &mut sqlx::PgConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(DbKind::Postgres, settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Build the app pool *and* guarantee the schema is current.
///
/// - SqliteMemory: build the single-connection app pool and migrate on it,
///   since every connection to `sqlite::memory:` is its own database.
/// - Others: migrate through a one-connection owner pool first, then build
///   the app pool.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    validate_db_config(env, db_kind)?;

    info!(
        "bootstrap=start env={:?} db_kind={:?} pid={}",
        env,
        db_kind,
        process::id()
    );

    let settings = build_connection_settings(env, db_kind, PoolPurpose::Runtime)?;

    let pool = match db_kind {
        DbKind::SqliteMemory => {
            let pool = build_pool(env, db_kind, &settings).await?;
            orchestrate_migration_internal(&pool, env, db_kind, MigrationCommand::Up).await?;
            pool
        }
        DbKind::SqliteFile | DbKind::Postgres => {
            let admin_pool = build_admin_pool(env, db_kind).await?;
            orchestrate_migration_internal(&admin_pool, env, db_kind, MigrationCommand::Up)
                .await?;
            if let Err(e) = admin_pool.close().await {
                trace!(error = %e, "admin pool close failed");
            }
            build_pool(env, db_kind, &settings).await?
        }
    };

    info!("bootstrap=ready");
    Ok(pool)
}

/// App-role pool with per-connection session settings applied in `after_connect`.
pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
    pool_cfg: &ConnectionSettings,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;

    match db_kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true);

            let db_settings = pool_cfg.db_settings.clone();
            let mut options = SqlitePoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms));
            if db_kind == DbKind::SqliteMemory {
                // recycling the only connection would drop the database with it
                options = options.idle_timeout(None).max_lifetime(None);
            }

            let pool: SqlitePool = options
                .after_connect(move |conn, _meta| {
                    let settings = db_settings.clone();
                    Box::pin(async move {
                        apply_sqlite_config(conn, &settings).await?;
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite pool: {e}")))?;

            info!(
                "pool=create engine=sqlite path={} min={} max={} acquire_timeout_ms={}",
                url, pool_cfg.pool_min, pool_cfg.pool_max, pool_cfg.acquire_timeout_ms
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }

        DbKind::Postgres => {
            let db_settings = pool_cfg.db_settings.clone();
            let pool = PgPoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .idle_timeout(Duration::from_secs(30))
                .after_connect(move |conn, _meta| {
                    let settings = db_settings.clone();
                    Box::pin(async move {
                        apply_postgres_config(conn, &settings).await?;
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect(&url)
                .await
                .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))?;

            info!(
                "pool=create engine=postgres url={} min={} max={} acquire_timeout_ms={}",
                sanitize_db_url(&url),
                pool_cfg.pool_min,
                pool_cfg.pool_max,
                pool_cfg.acquire_timeout_ms
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
        }
    }
}
