use sea_orm::ConnectionTrait;
use tracing::info;

use crate::auth::Subject;
use crate::error::AppError;
use crate::errors::domain::{NotFoundKind, ValidationKind};
use crate::errors::DomainError;
use crate::repos::orders::{self, Order, OrderCreate};
use crate::services::users::get_profile;

fn validate_total(total: f64) -> Result<(), DomainError> {
    if total.is_finite() && total > 0.0 {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::OrderTotal,
            "Order total must be greater than zero",
        ))
    }
}

/// New `pending` order owned by `subject`.
pub async fn create_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: Subject,
    total: f64,
) -> Result<Order, AppError> {
    validate_total(total)?;
    let user = get_profile(conn, subject).await?;

    let order = orders::create_order(conn, OrderCreate::pending(user.id, total)).await?;
    info!(user_id = user.id, order_id = order.id, "order created");
    Ok(order)
}

pub async fn list_orders<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: Subject,
) -> Result<Vec<Order>, AppError> {
    Ok(orders::list_for_user(conn, subject.db_id()).await?)
}

/// Soft-delete one of the caller's orders. Someone else's order looks
/// exactly like a missing one.
pub async fn cancel_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: Subject,
    order_id: i64,
) -> Result<(), AppError> {
    let order = orders::find_for_user(conn, order_id, subject.db_id())
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Order, "Order not found"))?;

    orders::soft_delete(conn, order.id).await?;
    info!(user_id = subject.get(), order_id = order.id, "order cancelled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_must_be_positive_and_finite() {
        assert!(validate_total(0.01).is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(validate_total(bad).is_err(), "{bad}");
        }
    }
}
