// tests/support/mod.rs
pub mod helpers;
pub mod mocks;

#[allow(unused_imports)]
pub use helpers::{
    body_json, build_test_state, make_test_router, multipart_content_type,
    multipart_register_body, seeded_alice,
};
