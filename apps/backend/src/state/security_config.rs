use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use tracing::warn;

use crate::auth::password;
use crate::config::{parse_var, RuntimeEnv};
use crate::error::AppError;

/// Signing secret used outside production when `JWT_SECRET` is unset.
pub const DEV_JWT_SECRET: &str = "storefront-insecure-dev-secret";

/// Access token lifetime.
pub const TOKEN_TTL: Duration = Duration::from_secs(72 * 60 * 60);

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Token signing and credential hashing settings.
#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: TOKEN_TTL,
            bcrypt_cost: password::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Cheapest hashing cost, for tests.
    pub fn for_tests() -> Self {
        Self::new(b"storefront-test-secret".to_vec()).with_bcrypt_cost(MIN_BCRYPT_COST)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET.as_bytes()
    }

    /// Read `JWT_SECRET` and `BCRYPT_COST`.
    ///
    /// Production refuses to start without a real secret. Other profiles fall
    /// back to [`DEV_JWT_SECRET`] and say so loudly.
    pub fn from_lookup<F>(env: RuntimeEnv, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = match lookup("JWT_SECRET") {
            Some(s) if env.is_prod() && s == DEV_JWT_SECRET => {
                return Err(AppError::config(
                    "JWT_SECRET must not be the development default in prod",
                ));
            }
            Some(s) => s,
            None if env.is_prod() => {
                return Err(AppError::config("JWT_SECRET must be set when APP_ENV=prod"));
            }
            None => {
                warn!(
                    env = ?env,
                    "JWT_SECRET not set; signing tokens with the insecure development secret"
                );
                DEV_JWT_SECRET.to_string()
            }
        };

        let cost = parse_var::<u32, _>(&lookup, "BCRYPT_COST")?.unwrap_or(password::DEFAULT_COST);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(AppError::config(format!(
                "BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}, got {cost}"
            )));
        }

        Ok(Self::new(secret.into_bytes()).with_bcrypt_cost(cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prod_without_secret_fails() {
        let err = SecurityConfig::from_lookup(RuntimeEnv::Prod, |_| None).expect_err("prod");
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn prod_rejects_dev_secret() {
        let result = SecurityConfig::from_lookup(RuntimeEnv::Prod, |name| {
            (name == "JWT_SECRET").then(|| DEV_JWT_SECRET.to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn dev_without_secret_uses_fallback() {
        let cfg = SecurityConfig::from_lookup(RuntimeEnv::Dev, |_| None).expect("dev");
        assert!(cfg.uses_dev_secret());
        assert_eq!(cfg.token_ttl, TOKEN_TTL);
        assert_eq!(cfg.algorithm, Algorithm::HS256);
    }

    #[test]
    fn explicit_secret_and_cost_are_used() {
        let cfg = SecurityConfig::from_lookup(RuntimeEnv::Prod, |name| match name {
            "JWT_SECRET" => Some("s3cret".to_string()),
            "BCRYPT_COST" => Some("6".to_string()),
            _ => None,
        })
        .expect("prod");
        assert_eq!(cfg.jwt_secret, b"s3cret");
        assert_eq!(cfg.bcrypt_cost, 6);
        assert!(!cfg.uses_dev_secret());
    }

    #[test]
    fn out_of_range_cost_is_rejected() {
        let result = SecurityConfig::from_lookup(RuntimeEnv::Dev, |name| {
            (name == "BCRYPT_COST").then(|| "2".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let printed = format!("{:?}", SecurityConfig::new(b"hunter2".to_vec()));
        assert!(!printed.contains("hunter2"));
    }
}
