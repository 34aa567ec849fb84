//! Domain repositories. Generic over `ConnectionTrait` and returning
//! `DomainError`, so services never see SeaORM types.

pub mod catalog;
pub mod orders;
pub mod users;
