//! Business operations. Handlers call these; these call repos.

pub mod orders;
pub mod users;
