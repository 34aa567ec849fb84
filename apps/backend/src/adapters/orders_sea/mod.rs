//! SeaORM adapter for orders. Cancelled orders keep their row with
//! `deleted_at` set, so every read filters on it.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::orders;

pub mod dto;

pub use dto::OrderCreate;

pub async fn create_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: OrderCreate,
) -> Result<orders::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    orders::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        total: Set(dto.total),
        status: Set(dto.status),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
}

pub async fn list_active_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<orders::Model>, sea_orm::DbErr> {
    orders::Entity::find()
        .filter(orders::Column::UserId.eq(user_id))
        .filter(orders::Column::DeletedAt.is_null())
        .order_by_asc(orders::Column::Id)
        .all(conn)
        .await
}

pub async fn find_active_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: i64,
    user_id: i64,
) -> Result<Option<orders::Model>, sea_orm::DbErr> {
    orders::Entity::find_by_id(order_id)
        .filter(orders::Column::UserId.eq(user_id))
        .filter(orders::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn mark_deleted<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: i64,
) -> Result<orders::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    orders::ActiveModel {
        id: Set(order_id),
        status: Set("cancelled".to_string()),
        updated_at: Set(now),
        deleted_at: Set(Some(now)),
        ..Default::default()
    }
    .update(conn)
    .await
}
