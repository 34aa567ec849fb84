use thiserror::Error;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Why an `Authorization` header was rejected before any token parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderFault {
    #[error("scheme is not Bearer")]
    Scheme,
    #[error("bearer token is empty")]
    EmptyToken,
}

/// Internal rejection reason. Distinguishes every failure for logging and
/// tests; the HTTP rendering collapses them to a handful of 401 bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("credential missing")]
    MissingCredential,
    #[error("credential mismatch")]
    CredentialMismatch,
    #[error("malformed authorization header: {0}")]
    MalformedHeader(HeaderFault),
    #[error("malformed token")]
    MalformedToken,
    #[error("token signature invalid")]
    SignatureInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("subject claim missing or unrecognized")]
    ClaimMissingOrUnrecognized,
    #[error("stored credential hash is malformed: {0}")]
    MalformedHash(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Stable snake_case label for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::CredentialMismatch => "credential_mismatch",
            AuthError::MalformedHeader(HeaderFault::Scheme) => "malformed_header_scheme",
            AuthError::MalformedHeader(HeaderFault::EmptyToken) => "malformed_header_empty",
            AuthError::MalformedToken => "malformed_token",
            AuthError::SignatureInvalid => "signature_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::ClaimMissingOrUnrecognized => "claim_unrecognized",
            AuthError::MalformedHash(_) => "malformed_hash",
            AuthError::Hashing(_) => "hashing_failed",
            AuthError::Signing(_) => "signing_failed",
        }
    }

    /// Server-side faults are not the caller's doing and render as 500.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedHash(_) | AuthError::Hashing(_) | AuthError::Signing(_)
        )
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => AppError::unauthorized(
                ErrorCode::UnauthorizedMissingBearer,
                "Authorization header is required",
            ),
            AuthError::MalformedHeader(_) => AppError::unauthorized(
                ErrorCode::UnauthorizedMalformedBearer,
                "Bearer token is required",
            ),
            AuthError::MalformedToken | AuthError::SignatureInvalid => {
                AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt, "Invalid token")
            }
            AuthError::TokenExpired => AppError::unauthorized(
                ErrorCode::UnauthorizedExpiredJwt,
                "Invalid or expired token",
            ),
            AuthError::ClaimMissingOrUnrecognized => AppError::unauthorized(
                ErrorCode::UnauthorizedInvalidClaims,
                "User ID not found in token",
            ),
            AuthError::CredentialMismatch => AppError::invalid_credentials(),
            AuthError::MalformedHash(detail) => {
                AppError::internal(ErrorCode::Internal, format!("malformed hash: {detail}"))
            }
            AuthError::Hashing(detail) => {
                AppError::internal(ErrorCode::Internal, format!("hashing: {detail}"))
            }
            AuthError::Signing(detail) => {
                AppError::internal(ErrorCode::Internal, format!("signing: {detail}"))
            }
        }
    }
}
