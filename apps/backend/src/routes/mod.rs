use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod profile;
pub mod responses;

/// Every route the service exposes. Protected scopes carry their own
/// `JwtExtract`, so tests and `main` share exactly the same wiring.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(products::configure_routes)
        .configure(categories::configure_routes)
        .configure(profile::configure_routes)
        .configure(orders::configure_routes)
        .default_service(web::to(not_found));
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Resource not found"))
}
