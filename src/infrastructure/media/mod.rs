// src/infrastructure/media/mod.rs
mod http_storage;

pub use http_storage::HttpMediaStorage;
