// src/application/queries/mod.rs
pub mod users;

pub use users::UserQueryService;
