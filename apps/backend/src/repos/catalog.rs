//! Category and product reads, plus the inserts used by seeding.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::catalog_sea as catalog_adapter;
use crate::entities::{categories, products};
use crate::errors::domain::{DomainError, InfraErrorKind};

pub use catalog_adapter::ProductCreate;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category: Category,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn list_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Category>, DomainError> {
    let rows = catalog_adapter::list_categories(conn).await?;
    Ok(rows.into_iter().map(Category::from).collect())
}

pub async fn list_products<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Product>, DomainError> {
    catalog_adapter::list_products(conn)
        .await?
        .into_iter()
        .map(|(product, category)| with_category(product, category))
        .collect()
}

pub async fn find_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Product>, DomainError> {
    catalog_adapter::find_product(conn, id)
        .await?
        .map(|(product, category)| with_category(product, category))
        .transpose()
}

/// Returns the category named `name`, creating it when absent.
pub async fn ensure_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<(Category, bool), DomainError> {
    if let Some(existing) = catalog_adapter::find_category_by_name(conn, name).await? {
        return Ok((Category::from(existing), false));
    }
    let created = catalog_adapter::create_category(conn, name).await?;
    Ok((Category::from(created), true))
}

/// Inserts the product unless one with the same name exists. Returns whether
/// a row was written.
pub async fn ensure_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProductCreate,
) -> Result<bool, DomainError> {
    if catalog_adapter::find_product_by_name(conn, &dto.name)
        .await?
        .is_some()
    {
        return Ok(false);
    }
    catalog_adapter::create_product(conn, dto).await?;
    Ok(true)
}

fn with_category(
    product: products::Model,
    category: Option<categories::Model>,
) -> Result<Product, DomainError> {
    // the foreign key is NOT NULL and RESTRICT, so a missing row means corruption
    let category = category.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("product {} references a missing category", product.id),
        )
    })?;
    Ok(Product {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        stock: product.stock,
        category: Category::from(category),
        created_at: product.created_at,
        updated_at: product.updated_at,
    })
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
