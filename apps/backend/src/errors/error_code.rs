//! Error codes for the storefront API.
//!
//! Every code maps 1:1 to the SCREAMING_SNAKE_CASE string that appears in
//! the `code` field of a Problem Details response. Add new codes here; never
//! pass ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Authorization header absent or empty
    UnauthorizedMissingBearer,
    /// Authorization header present but not `Bearer <token>`
    UnauthorizedMalformedBearer,
    /// Token is structurally invalid or its signature does not verify
    UnauthorizedInvalidJwt,
    /// Token is past its expiry
    UnauthorizedExpiredJwt,
    /// Token verified but carries no usable subject
    UnauthorizedInvalidClaims,
    /// Login rejected (unknown email or wrong password)
    InvalidCredentials,

    // Request validation
    ValidationError,
    BadRequest,
    InvalidEmail,
    InvalidPassword,
    InvalidName,
    InvalidProductId,
    InvalidOrderId,
    InvalidOrderTotal,

    // Resource not found
    NotFound,
    UserNotFound,
    ProductNotFound,
    OrderNotFound,
    RecordNotFound,

    // Conflicts
    UniqueEmail,
    Conflict,

    // System
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    Internal,
    InternalError,
    ConfigError,
}

impl ErrorCode {
    /// Canonical string used in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedMalformedBearer => "UNAUTHORIZED_MALFORMED_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedInvalidClaims => "UNAUTHORIZED_INVALID_CLAIMS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidProductId => "INVALID_PRODUCT_ID",
            Self::InvalidOrderId => "INVALID_ORDER_ID",
            Self::InvalidOrderTotal => "INVALID_ORDER_TOTAL",

            Self::NotFound => "NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
