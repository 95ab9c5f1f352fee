use sea_orm::DatabaseConnection;

use super::site_config::SiteConfig;

/// Application state shared by all workers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent for handler-only tests)
    pub db: Option<DatabaseConnection>,
    pub site: SiteConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, site: SiteConfig) -> Self {
        Self { db: Some(db), site }
    }

    pub fn without_db(site: SiteConfig) -> Self {
        Self { db: None, site }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
