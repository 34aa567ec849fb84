//! Development fixture data. Every step is idempotent, so it can run on each
//! start against a persistent database.

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::repos::catalog::{self, ProductCreate};
use crate::repos::orders::{self, OrderCreate};
use crate::repos::users::{self, UserCreate};

pub const TEST_USER_EMAIL: &str = "dredd.test@example.com";
pub const TEST_USER_PASSWORD: &str = "testpassword123";

const CATEGORIES: [&str; 3] = ["Electronics", "Books", "Clothing"];

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: f64,
    stock: i32,
}

const ELECTRONICS: [SeedProduct; 2] = [
    SeedProduct {
        name: "Test Laptop",
        description: "A test laptop for API testing",
        price: 999.99,
        stock: 10,
    },
    SeedProduct {
        name: "Test Phone",
        description: "A test phone for API testing",
        price: 699.99,
        stock: 25,
    },
];

const ORDER_TOTALS: [f64; 2] = [99.99, 149.99];

pub async fn seed_test_data(conn: &DatabaseConnection, bcrypt_cost: u32) -> Result<(), AppError> {
    let mut electronics_id = None;
    for name in CATEGORIES {
        let (category, created) = catalog::ensure_category(conn, name).await?;
        if created {
            info!(category = name, "seed=category_created");
        }
        if name == "Electronics" {
            electronics_id = Some(category.id);
        }
    }
    let electronics_id = electronics_id
        .ok_or_else(|| AppError::config("seed categories must include Electronics"))?;

    for product in ELECTRONICS {
        let created = catalog::ensure_product(
            conn,
            ProductCreate {
                name: product.name.to_string(),
                description: product.description.to_string(),
                price: product.price,
                stock: product.stock,
                category_id: electronics_id,
            },
        )
        .await?;
        if created {
            info!(product = product.name, "seed=product_created");
        }
    }

    // The password is reset every start so the documented credentials always work.
    let hash = hash_password(TEST_USER_PASSWORD, bcrypt_cost)?;
    let user = match users::find_by_email(conn, TEST_USER_EMAIL).await? {
        Some(existing) => users::set_password_hash(conn, existing.id, hash).await?,
        None => {
            users::create_user(
                conn,
                UserCreate::new(TEST_USER_EMAIL, hash).with_names("Test", "User"),
            )
            .await?
        }
    };

    if orders::list_for_user(conn, user.id).await?.is_empty() {
        for total in ORDER_TOTALS {
            orders::create_order(conn, OrderCreate::pending(user.id, total)).await?;
        }
        info!(user_id = user.id, "seed=orders_created");
    }

    info!("seed=complete");
    Ok(())
}
