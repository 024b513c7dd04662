// src/application/ports/security.rs
use crate::application::{
    ApplicationResult,
    dto::{AuthenticatedUser, TokenPairDto, TokenSubject},
};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}

#[async_trait]
pub trait TokenManager: Send + Sync {
    /// Sign an access/refresh token pair for the subject. The access token
    /// carries id, username, and email; the refresh token carries the id only.
    async fn issue_pair(&self, subject: TokenSubject) -> ApplicationResult<TokenPairDto>;

    /// Verify an access token and recover the identity it carries.
    /// Refresh tokens presented here must be rejected.
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser>;

    /// Verify a refresh token and return the user id it is bound to.
    async fn verify_refresh(&self, token: &str) -> ApplicationResult<UserId>;
}
