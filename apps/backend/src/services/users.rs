use std::sync::{LazyLock, OnceLock};

use regex::Regex;
use sea_orm::ConnectionTrait;
use tracing::{error, info};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthError, Subject, TokenService};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, NotFoundKind, ValidationKind};
use crate::errors::{DomainError, ErrorCode};
use crate::logging::security;
use crate::repos::users::{self, ProfileUpdate, User, UserCreate};
use crate::state::clock::Clock;

pub const MIN_PASSWORD_LEN: usize = 6;
/// bcrypt ignores everything past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[allow(clippy::expect_used)]
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern")
});

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub email: String,
    pub password: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(input: &Registration) -> Result<(), DomainError> {
    let fields = [
        &input.email,
        &input.password,
        &input.first_name,
        &input.last_name,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(DomainError::validation(
            ValidationKind::Other,
            "Email, password, first name and last name are required",
        ));
    }
    if !EMAIL_SHAPE.is_match(input.email.trim()) {
        return Err(DomainError::validation(
            ValidationKind::Email,
            "Invalid email address",
        ));
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(
            ValidationKind::Password,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if input.password.len() > MAX_PASSWORD_BYTES {
        return Err(DomainError::validation(
            ValidationKind::Password,
            format!("Password must be at most {MAX_PASSWORD_BYTES} bytes"),
        ));
    }
    Ok(())
}

async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::internal(ErrorCode::Internal, format!("blocking task failed: {e}")))?
        .map_err(AppError::from)
}

/// Hash that never matches; verified against when the email is unknown so
/// both failure paths cost one bcrypt run.
fn dummy_hash(cost: u32) -> Result<String, AuthError> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash.clone());
    }
    let hash = hash_password("storefront-no-such-user", cost)?;
    Ok(DUMMY_HASH.get_or_init(|| hash).clone())
}

pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: Registration,
    bcrypt_cost: u32,
) -> Result<User, AppError> {
    validate_registration(&input)?;
    let email = normalize_email(&input.email);

    if users::find_by_email(conn, &email).await?.is_some() {
        return Err(
            DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered").into(),
        );
    }

    let password = input.password;
    let hash = run_blocking(move || hash_password(&password, bcrypt_cost)).await?;

    // A concurrent registration can still win the race; the unique index
    // turns that into the same 409.
    let user = users::create_user(
        conn,
        UserCreate::new(email, hash).with_names(input.first_name.trim(), input.last_name.trim()),
    )
    .await?;

    info!(user_id = user.id, "user registered");
    Ok(user)
}

/// Verify credentials and issue an access token.
///
/// Empty fields, an unknown email and a wrong password all produce the same
/// `INVALID_CREDENTIALS` response.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tokens: &TokenService,
    clock: &dyn Clock,
    attempt: LoginAttempt,
    bcrypt_cost: u32,
) -> Result<String, AppError> {
    let email = normalize_email(&attempt.email);
    if email.is_empty() || attempt.password.is_empty() {
        security::login_failed("missing_fields", Some(&email));
        return Err(AppError::invalid_credentials());
    }

    let Some(user) = users::find_by_email(conn, &email).await? else {
        let password = attempt.password;
        run_blocking(move || {
            let hash = dummy_hash(bcrypt_cost)?;
            verify_password(&hash, &password)
        })
        .await?;
        security::login_failed("unknown_email", Some(&email));
        return Err(AppError::invalid_credentials());
    };

    let stored = user.password_hash.clone();
    let password = attempt.password;
    let matched = run_blocking(move || verify_password(&stored, &password))
        .await
        .inspect_err(|e| error!(user_id = user.id, error = %e, "credential verification failed"))?;
    if !matched {
        security::login_failed("wrong_password", Some(&email));
        return Err(AppError::from(AuthError::CredentialMismatch));
    }

    let subject = Subject::try_from(user.id).map_err(|_| {
        AppError::internal(ErrorCode::Internal, format!("user id {} is not a valid subject", user.id))
    })?;
    let token = tokens.issue(subject, clock.now())?;

    info!(user_id = user.id, "login succeeded");
    Ok(token)
}

pub async fn get_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: Subject,
) -> Result<User, AppError> {
    users::find_by_id(conn, subject.db_id())
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found").into())
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: Subject,
    first_name: &str,
    last_name: &str,
) -> Result<User, AppError> {
    let (first, last) = (first_name.trim(), last_name.trim());
    if first.is_empty() || last.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Name,
            "First name and last name are required",
        )
        .into());
    }

    let user = get_profile(conn, subject).await?;
    let updated = users::update_profile(
        conn,
        ProfileUpdate {
            id: user.id,
            first_name: first.to_string(),
            last_name: last.to_string(),
        },
    )
    .await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn registration_validation() {
        assert!(validate_registration(&registration("ada@example.com", "secret1")).is_ok());

        let cases = [
            (registration("", "secret1"), ValidationKind::Other),
            (registration("ada@example.com", "   "), ValidationKind::Other),
            (registration("not-an-email", "secret1"), ValidationKind::Email),
            (registration("ada@example.com", "short"), ValidationKind::Password),
            (
                registration("ada@example.com", &"x".repeat(73)),
                ValidationKind::Password,
            ),
        ];
        for (input, kind) in cases {
            match validate_registration(&input) {
                Err(DomainError::Validation(got, _)) => assert_eq!(got, kind, "{input:?}"),
                other => panic!("expected validation error for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn dummy_hash_never_matches_real_passwords() {
        let hash = dummy_hash(4).expect("dummy");
        assert_eq!(verify_password(&hash, "testpassword123"), Ok(false));
    }
}
