pub mod current_user;
pub mod resource_id;
pub mod validated_json;

pub use current_user::AuthenticatedUser;
pub use resource_id::parse_resource_id;
pub use validated_json::ValidatedJson;
