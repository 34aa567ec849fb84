use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::responses::UserResponse;
use crate::error::AppError;
use crate::extractors::{AuthenticatedUser, ValidatedJson};
use crate::infra::db::require_db;
use crate::middleware::JwtExtract;
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

async fn get_profile(
    user: AuthenticatedUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let profile = users::get_profile(db, user.subject).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(profile)))
}

async fn update_profile(
    user: AuthenticatedUser,
    body: ValidatedJson<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let updated =
        users::update_profile(db, user.subject, &body.first_name, &body.last_name).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/profile").wrap(JwtExtract).service(
            web::resource("")
                .route(web::get().to(get_profile))
                .route(web::put().to(update_profile)),
        ),
    );
}
