//! DTOs for orders_sea adapter.

#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: i64,
    pub total: f64,
    pub status: String,
}

impl OrderCreate {
    pub fn pending(user_id: i64, total: f64) -> Self {
        Self {
            user_id,
            total,
            status: "pending".to_string(),
        }
    }
}
