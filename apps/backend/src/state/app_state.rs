use std::sync::Arc;
use std::time::SystemTime;

use sea_orm::DatabaseConnection;

use super::clock::{Clock, SystemClock};
use super::security_config::SecurityConfig;
use crate::auth::TokenService;

/// Application state shared by every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in handler-only tests)
    pub db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    /// Built once from `security`; holds the signing keys
    pub tokens: TokenService,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self::assemble(Some(db), security)
    }

    pub fn without_db(security: SecurityConfig) -> Self {
        Self::assemble(None, security)
    }

    fn assemble(db: Option<DatabaseConnection>, security: SecurityConfig) -> Self {
        Self {
            db,
            tokens: TokenService::new(&security),
            security,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }
}
