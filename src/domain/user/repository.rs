// src/domain/user/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User},
    value_objects::UserId,
};
use async_trait::async_trait;

/// Identity used for lookups: a lowercased username, an email, or both.
/// A user matches when either field matches.
#[derive(Debug, Clone, Default)]
pub struct LoginIdentity {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl LoginIdentity {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn find_by_login(&self, identity: &LoginIdentity) -> DomainResult<Option<User>>;

    /// Targeted patch of the refresh-token column only. Deliberately not a
    /// full-entity save: the rest of the row is untouched and no entity
    /// re-validation runs, so issuing tokens never needs the password again.
    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> DomainResult<()>;
}
