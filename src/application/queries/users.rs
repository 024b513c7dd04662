// src/application/queries/users.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::UserRepository,
};

pub struct UserQueryService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Sanitized record for the authenticated caller.
    pub async fn current_user(&self, auth: &AuthenticatedUser) -> ApplicationResult<UserDto> {
        let user = self
            .user_repo
            .find_by_id(auth.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user does not exist"))?;

        Ok(user.into())
    }
}
