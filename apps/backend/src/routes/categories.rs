use actix_web::{web, HttpResponse};

use super::responses::CategoryResponse;
use crate::error::AppError;
use crate::infra::db::require_db;
use crate::repos::catalog;
use crate::state::app_state::AppState;

async fn list_categories(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let categories: Vec<CategoryResponse> = catalog::list_categories(db)
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(categories))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/categories", web::get().to(list_categories));
}
