use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::DbKind;
use crate::error::AppError;
use crate::state::app_state::AppState;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Database handle from state, or a 503 when the service runs without one.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::db_unavailable("database not configured"))
}

fn engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::Sqlite | DbKind::SqliteMemory => "sqlite",
    }
}

fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5));

    match kind {
        // every pooled connection to :memory: is a separate database
        DbKind::SqliteMemory => {
            opts.max_connections(1)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(60 * 60 * 24 * 365))
                .max_lifetime(Duration::from_secs(60 * 60 * 24 * 365));
        }
        DbKind::Sqlite => {
            opts.max_connections(4).min_connections(1);
        }
        DbKind::Postgres => {
            opts.max_connections(10).min_connections(1);
        }
    }
    opts
}

/// Retry with a fixed interval; returns the last error once attempts run out.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Connect and bring the schema up to date. Single entrypoint for `main`
/// and tests.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let kind = DbKind::from_url(url)?;
    let attempts = match kind {
        DbKind::Postgres => CONNECT_ATTEMPTS,
        DbKind::Sqlite | DbKind::SqliteMemory => 1,
    };

    let conn = retry_connection(
        move || async move {
            Database::connect(connect_options(url, kind))
                .await
                .map_err(|e| AppError::db_unavailable(format!("connect failed: {e}")))
        },
        attempts,
        CONNECT_INTERVAL_MS,
    )
    .await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    info!(engine = engine(kind), "bootstrap=ready");
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[tokio::test]
    async fn retry_returns_last_error_after_max_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), AppError> = retry_connection(
            || {
                calls.set(calls.get() + 1);
                async { Err(AppError::db_unavailable("nope")) }
            },
            3,
            1,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn retry_stops_on_first_success() {
        let calls = Cell::new(0);
        let result = retry_connection(
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 2 {
                        Err(AppError::db_unavailable("later"))
                    } else {
                        Ok(n)
                    }
                }
            },
            5,
            1,
        )
        .await;
        assert_eq!(result.ok(), Some(2));
    }

    #[tokio::test]
    async fn memory_database_bootstraps_with_schema() {
        let conn = bootstrap_db("sqlite::memory:").await.expect("bootstrap");
        let version = migration::get_latest_migration_version(&conn)
            .await
            .expect("version query");
        assert!(version.is_some());
    }
}
