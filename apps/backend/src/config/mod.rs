//! Environment-driven configuration.
//!
//! Every reader takes a lookup closure so tests can feed a fixed map instead
//! of mutating the process environment.

pub mod db;

use std::str::FromStr;

use crate::error::AppError;

/// Deployment profile selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
    Prod,
    #[default]
    Dev,
    Test,
}

impl RuntimeEnv {
    pub fn is_prod(self) -> bool {
        self == RuntimeEnv::Prod
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("APP_ENV") {
            None => Ok(RuntimeEnv::default()),
            Some(raw) if raw.trim().is_empty() => Ok(RuntimeEnv::default()),
            Some(raw) => raw.parse(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }
}

impl FromStr for RuntimeEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(RuntimeEnv::Prod),
            "dev" | "development" => Ok(RuntimeEnv::Dev),
            "test" => Ok(RuntimeEnv::Test),
            other => Err(AppError::config(format!("unknown APP_ENV '{other}'"))),
        }
    }
}

/// Process environment as a lookup; empty values read as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional variable, reporting the variable name on failure.
pub fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| AppError::config(format!("{name} has an invalid value '{raw}'")))
        })
        .transpose()
}
