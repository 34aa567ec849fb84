//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::DomainError;

pub use users_adapter::{ProfileUpdate, UserCreate};

/// User domain model. Carries the stored hash; never serialize it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, id).await?;
    Ok(user.map(User::from))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProfileUpdate,
) -> Result<User, DomainError> {
    let user = users_adapter::update_profile(conn, dto).await?;
    Ok(User::from(user))
}

pub async fn set_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    password_hash: String,
) -> Result<User, DomainError> {
    let user = users_adapter::set_password_hash(conn, id, password_hash).await?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
