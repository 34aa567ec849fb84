use actix_web::dev::{Extensions, Payload};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::Subject;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Identity attached to a request by `JwtExtract` once its bearer token
/// validates. Handlers on protected routes take it as an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: Subject,
}

impl AuthenticatedUser {
    pub fn from_extensions(extensions: &Extensions) -> Option<Self> {
        extensions.get::<Self>().copied()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Only reachable without an identity if a route forgot the middleware.
        ready(
            Self::from_extensions(&req.extensions()).ok_or_else(|| {
                AppError::unauthorized(ErrorCode::Unauthorized, "Authentication required")
            }),
        )
    }
}
