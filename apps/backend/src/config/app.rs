//! Server settings read once at startup.

use std::env;
use std::str::FromStr;

use crate::config::db::DbKind;
use crate::error::AppError;
use crate::state::site_config::SiteConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_kind: DbKind,
    pub site: SiteConfig,
}

impl ServerConfig {
    /// `BACKEND_HOST`, `BACKEND_PORT`, `LEAGUE_DB_KIND` and `MEDIA_URL`.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number"))?,
            Err(_) => 3001,
        };

        let db_kind = match env::var("LEAGUE_DB_KIND") {
            Ok(raw) if !raw.trim().is_empty() => DbKind::from_str(&raw)?,
            _ => DbKind::Postgres,
        };

        Ok(Self {
            host,
            port,
            db_kind,
            site: SiteConfig::from_env(),
        })
    }
}
