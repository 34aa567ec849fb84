//! SeaORM adapter for categories and products.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{categories, products};

pub mod dto;

pub use dto::ProductCreate;

pub async fn list_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::Id)
        .all(conn)
        .await
}

pub async fn find_category_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn create_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<categories::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    categories::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Products with their category, ordered by id.
pub async fn list_products<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(products::Model, Option<categories::Model>)>, sea_orm::DbErr> {
    products::Entity::find()
        .find_also_related(categories::Entity)
        .order_by_asc(products::Column::Id)
        .all(conn)
        .await
}

pub async fn find_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<(products::Model, Option<categories::Model>)>, sea_orm::DbErr> {
    products::Entity::find_by_id(id)
        .find_also_related(categories::Entity)
        .one(conn)
        .await
}

pub async fn find_product_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<products::Model>, sea_orm::DbErr> {
    products::Entity::find()
        .filter(products::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn create_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProductCreate,
) -> Result<products::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    products::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        price: Set(dto.price),
        stock: Set(dto.stock),
        category_id: Set(dto.category_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}
