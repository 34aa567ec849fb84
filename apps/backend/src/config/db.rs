use super::RuntimeEnv;
use crate::error::AppError;

/// In-memory SQLite, used whenever no database is configured outside prod.
pub const MEMORY_DB_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    Sqlite,
    SqliteMemory,
}

impl DbKind {
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if url == MEMORY_DB_URL || url.contains("mode=memory") {
            Ok(DbKind::SqliteMemory)
        } else if url.starts_with("sqlite:") {
            Ok(DbKind::Sqlite)
        } else {
            Err(AppError::config(
                "DATABASE_URL must be a postgres:// or sqlite: URL",
            ))
        }
    }
}

/// Resolve `DATABASE_URL`. Production must name a database explicitly.
pub fn database_url<F>(env: RuntimeEnv, lookup: F) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("DATABASE_URL") {
        Some(url) => {
            DbKind::from_url(&url)?;
            Ok(url)
        }
        None if env.is_prod() => Err(AppError::config(
            "DATABASE_URL must be set when APP_ENV=prod",
        )),
        None => Ok(MEMORY_DB_URL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_prod_falls_back_to_memory() {
        assert_eq!(
            database_url(RuntimeEnv::Dev, |_| None).ok().as_deref(),
            Some(MEMORY_DB_URL)
        );
    }

    #[test]
    fn prod_requires_url() {
        assert!(database_url(RuntimeEnv::Prod, |_| None).is_err());
    }

    #[test]
    fn kinds_detected_from_url() {
        assert_eq!(
            DbKind::from_url("postgres://u:p@h/db").ok(),
            Some(DbKind::Postgres)
        );
        assert_eq!(
            DbKind::from_url("sqlite://store.db?mode=rwc").ok(),
            Some(DbKind::Sqlite)
        );
        assert_eq!(
            DbKind::from_url(MEMORY_DB_URL).ok(),
            Some(DbKind::SqliteMemory)
        );
        assert!(DbKind::from_url("mysql://x").is_err());
    }
}
