use actix_web::{web, HttpResponse};

use super::responses::ProductResponse;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::parse_resource_id;
use crate::infra::db::require_db;
use crate::repos::catalog;
use crate::state::app_state::AppState;

async fn list_products(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let products: Vec<ProductResponse> = catalog::list_products(db)
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(products))
}

async fn get_product(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_resource_id(&path, ErrorCode::InvalidProductId, "product")?;
    let db = require_db(&app_state)?;

    let product = catalog::find_product(db, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::ProductNotFound, "Product not found"))?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .route("", web::get().to(list_products))
            .route("/{id}", web::get().to(get_product)),
    );
}
