// tests/support/helpers.rs
use super::mocks;
use axum::body;
use axum::response::Response;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use clipstream_core::application::ports::{
    media::MediaStorage,
    security::{PasswordHasher, TokenManager},
    time::Clock,
};
use clipstream_core::application::services::ApplicationServices;
use clipstream_core::domain::user::{
    Email, PasswordHash, User, UserId, UserRepository, Username,
};
use clipstream_core::presentation::http::state::HttpState;

/// A seeded user the e2e tests log in as. The stored hash matches
/// `StrictPasswordHasher::hash("pw123")`.
pub fn seeded_alice() -> User {
    User {
        id: UserId::new(1).unwrap(),
        username: Username::new("alice").unwrap(),
        email: Email::new("a@x.com").unwrap(),
        full_name: "Alice A".into(),
        password_hash: PasswordHash::new("hash::pw123").unwrap(),
        avatar_url: "https://media.test/alice.png".into(),
        cover_image_url: String::new(),
        refresh_token: None,
        created_at: mocks::time::fixed_now(),
    }
}

pub struct TestHarness {
    pub repo: Arc<mocks::InMemoryUserRepo>,
    pub state: HttpState,
    pub upload_dir: tempfile::TempDir,
}

/// Build HTTP state over the in-memory repo with deterministic doubles for
/// every port. Uploads spool into a throwaway temp dir.
pub fn build_test_state(users: Vec<User>) -> TestHarness {
    let repo = Arc::new(mocks::InMemoryUserRepo::with_users(users));
    let user_repo: Arc<dyn UserRepository> = Arc::clone(&repo) as Arc<dyn UserRepository>;
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(mocks::StrictPasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(mocks::SeqTokenManager::new());
    let media_storage: Arc<dyn MediaStorage> = Arc::new(mocks::DummyMediaStorage::default());
    let clock: Arc<dyn Clock> = Arc::new(mocks::DummyClock);

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        password_hasher,
        token_manager,
        media_storage,
        clock,
    ));

    let upload_dir = tempfile::tempdir().expect("temp upload dir");

    let state = HttpState {
        services,
        upload_dir: PathBuf::from(upload_dir.path()),
    };

    TestHarness {
        repo,
        state,
        upload_dir,
    }
}

pub fn make_test_router(users: Vec<User>) -> (axum::Router, TestHarness) {
    let harness = build_test_state(users);
    let router = clipstream_core::presentation::http::routes::build_router(harness.state.clone());
    (router, harness)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Hand-rolled multipart body for the register endpoint.
pub fn multipart_register_body(
    boundary: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (name, file_name, bytes) in files {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}
