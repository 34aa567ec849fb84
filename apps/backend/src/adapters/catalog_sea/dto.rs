//! DTOs for catalog_sea adapter.

#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category_id: i64,
}
