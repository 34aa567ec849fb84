use tracing::warn;

use crate::auth::AuthError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a failed login attempt. The email is redacted; the password never
/// reaches this function.
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        reason,
        "Authentication failure"
    );
}

/// Log a bearer token rejected on a protected route.
pub fn token_rejected(err: &AuthError, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason = err.reason(),
        path,
        "Bearer token rejected"
    );
}
