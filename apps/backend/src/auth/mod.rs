//! Stateless bearer-token authentication.
//!
//! - [`password`] verifies a plaintext secret against a stored bcrypt hash.
//! - [`token`] issues and validates signed, expiring access tokens.
//! - [`bearer`] pulls the raw token out of an `Authorization` header.
//! - [`claims`] holds the subject type and its wire normalization.
//!
//! Failures are reported as [`AuthError`]; clients only ever see a uniform
//! 401 Problem Details body, never the precise reason.

pub mod bearer;
pub mod claims;
pub mod error;
pub mod password;
pub mod token;

pub use claims::Subject;
pub use error::{AuthError, HeaderFault};
pub use token::TokenService;
