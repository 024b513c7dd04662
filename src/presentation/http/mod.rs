// src/presentation/http/mod.rs
pub mod controllers;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;
