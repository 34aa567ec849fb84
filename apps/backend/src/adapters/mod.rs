//! SeaORM adapters. Functions here speak `DbErr`; the repos layer maps it.

pub mod catalog_sea;
pub mod orders_sea;
pub mod users_sea;
