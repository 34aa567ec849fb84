use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::responses::{MessageResponse, OrderResponse};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{parse_resource_id, AuthenticatedUser, ValidatedJson};
use crate::infra::db::require_db;
use crate::middleware::JwtExtract;
use crate::services::orders;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub total: f64,
}

async fn create_order(
    user: AuthenticatedUser,
    body: ValidatedJson<CreateOrderRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let order = orders::create_order(db, user.subject, body.total).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

async fn list_orders(
    user: AuthenticatedUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let list: Vec<OrderResponse> = orders::list_orders(db, user.subject)
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(list))
}

async fn cancel_order(
    user: AuthenticatedUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let order_id = parse_resource_id(&path, ErrorCode::InvalidOrderId, "order")?;
    let db = require_db(&app_state)?;
    orders::cancel_order(db, user.subject, order_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Order cancelled successfully",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/orders")
            .wrap(JwtExtract)
            .service(
                web::resource("")
                    .route(web::get().to(list_orders))
                    .route(web::post().to(create_order)),
            )
            .service(web::resource("/{id}").route(web::delete().to(cancel_order))),
    );
}
