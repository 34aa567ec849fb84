//! Order repository functions. Only active (not cancelled) orders are visible.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::orders_sea as orders_adapter;
use crate::errors::domain::DomainError;

pub use orders_adapter::OrderCreate;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total: f64,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn create_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: OrderCreate,
) -> Result<Order, DomainError> {
    let order = orders_adapter::create_order(conn, dto).await?;
    Ok(Order::from(order))
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Order>, DomainError> {
    let rows = orders_adapter::list_active_for_user(conn, user_id).await?;
    Ok(rows.into_iter().map(Order::from).collect())
}

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: i64,
    user_id: i64,
) -> Result<Option<Order>, DomainError> {
    let order = orders_adapter::find_active_for_user(conn, order_id, user_id).await?;
    Ok(order.map(Order::from))
}

pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: i64,
) -> Result<(), DomainError> {
    orders_adapter::mark_deleted(conn, order_id).await?;
    Ok(())
}

impl From<crate::entities::orders::Model> for Order {
    fn from(model: crate::entities::orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            total: model.total,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
