use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::infra::seed::seed_test_data;
use crate::state::app_state::AppState;
use crate::state::clock::Clock;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_url: Option<String>,
    seed: bool,
    clock: Option<Arc<dyn Clock>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::for_tests(),
            db_url: None,
            seed: false,
            clock: None,
        }
    }

    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_seed_data(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db_url {
            Some(url) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(&url).await?;
                if self.seed {
                    seed_test_data(&conn, self.security_config.bcrypt_cost).await?;
                }
                AppState::new(conn, self.security_config)
            }
            None => {
                info!("state=without_db");
                AppState::without_db(self.security_config)
            }
        };

        Ok(match self.clock {
            Some(clock) => state.with_clock(clock),
            None => state,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
