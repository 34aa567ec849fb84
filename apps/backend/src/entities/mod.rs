pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

pub use categories::Entity as Categories;
pub use categories::Model as Category;
pub use orders::Entity as Orders;
pub use orders::Model as Order;
pub use products::Entity as Products;
pub use products::Model as Product;
pub use users::Entity as Users;
pub use users::Model as User;
