//! Bearer token gate for protected scopes.
//!
//! Extracts the token from `Authorization`, validates it against the state's
//! `TokenService` and clock, and stores an [`AuthenticatedUser`] in request
//! extensions. Rejections are answered here with a 401 Problem Details
//! response; the wrapped service never runs.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::bearer::extract_bearer;
use crate::auth::{AuthError, HeaderFault};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::AuthenticatedUser;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                // Rendered now, while the request's trace scope is active.
                let response = err.error_response().map_into_right_body();
                let (http_req, _) = req.into_parts();
                Box::pin(async move { Ok(ServiceResponse::new(http_req, response)) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal(ErrorCode::InternalError, "AppState not available"))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AuthError::MalformedHeader(HeaderFault::Scheme))
        })
        .transpose();

    let subject = header_value
        .and_then(extract_bearer)
        .and_then(|token| state.tokens.validate(token, state.now()))
        .map_err(|err| {
            security::token_rejected(&err, req.path());
            err
        })?;

    Ok(AuthenticatedUser { subject })
}
