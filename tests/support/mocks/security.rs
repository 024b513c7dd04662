// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use std::sync::atomic::{AtomicU64, Ordering};

use clipstream_core::application::ApplicationResult;
use clipstream_core::application::dto::{AuthenticatedUser, TokenPairDto, TokenSubject};
use clipstream_core::application::error::ApplicationError;
use clipstream_core::application::ports::security::{PasswordHasher, TokenManager};
use clipstream_core::domain::user::UserId;

/* -------------------------------- TokenManager -------------------------------- */

/// Deterministic token manager. Issued tokens look like
/// `access-<uid>-<n>` / `refresh-<uid>-<n>` so tests can tell rotations
/// apart and authenticate without any cryptography.
#[derive(Debug, Default)]
pub struct SeqTokenManager {
    counter: AtomicU64,
}

impl SeqTokenManager {
    pub fn new() -> Self {
        Self::default()
    }
}

fn parse_suffix(token: &str, prefix: &str) -> Option<i64> {
    let rest = token.strip_prefix(prefix)?;
    let (uid, _n) = rest.split_once('-')?;
    uid.parse().ok()
}

#[async_trait]
impl TokenManager for SeqTokenManager {
    async fn issue_pair(&self, subject: TokenSubject) -> ApplicationResult<TokenPairDto> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let uid = i64::from(subject.user_id);
        let now = super::time::fixed_now();

        Ok(TokenPairDto {
            access_token: format!("access-{uid}-{n}"),
            refresh_token: format!("refresh-{uid}-{n}"),
            access_expires_at: now + Duration::minutes(15),
            access_expires_in: 900,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let uid = parse_suffix(token, "access-")
            .ok_or_else(|| ApplicationError::unauthorized("invalid token"))?;
        let now = super::time::fixed_now();

        Ok(AuthenticatedUser {
            id: UserId::new(uid).map_err(ApplicationError::from)?,
            username: format!("user{uid}"),
            email: format!("user{uid}@example.com"),
            issued_at: now,
            expires_at: now + Duration::hours(1),
        })
    }

    async fn verify_refresh(&self, token: &str) -> ApplicationResult<UserId> {
        let uid = parse_suffix(token, "refresh-")
            .ok_or_else(|| ApplicationError::unauthorized("invalid refresh token"))?;
        Ok(UserId::new(uid).map_err(ApplicationError::from)?)
    }
}

/// Token manager whose issuance always fails, for exercising the opaque
/// 500 path.
#[derive(Debug, Default)]
pub struct BrokenTokenManager;

#[async_trait]
impl TokenManager for BrokenTokenManager {
    async fn issue_pair(&self, _subject: TokenSubject) -> ApplicationResult<TokenPairDto> {
        Err(ApplicationError::infrastructure("signing key unavailable"))
    }

    async fn authenticate(&self, _token: &str) -> ApplicationResult<AuthenticatedUser> {
        Err(ApplicationError::unauthorized("invalid token"))
    }

    async fn verify_refresh(&self, _token: &str) -> ApplicationResult<UserId> {
        Err(ApplicationError::unauthorized("invalid refresh token"))
    }
}

/* -------------------------------- PasswordHasher -------------------------------- */

/// Lenient hasher: accepts any password (most tests).
#[derive(Clone, Debug, Default)]
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, _password: &str) -> ApplicationResult<String> {
        Ok("hash".into())
    }

    async fn verify(&self, _password: &str, _expected_hash: &str) -> ApplicationResult<()> {
        Ok(())
    }
}

/// Strict hasher for negative-path tests: verify only succeeds when the
/// stored hash was produced by this hasher for the same password.
#[derive(Clone, Debug, Default)]
pub struct StrictPasswordHasher;

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if format!("hash::{password}") == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("bad password"))
        }
    }
}
