// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub full_name: String,
    pub password_hash: PasswordHash,
    pub avatar_url: String,
    pub cover_image_url: String,
    /// Mirror of the most recently issued refresh token. `None` once the
    /// user logs out, or before the first login.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub full_name: String,
    pub password_hash: PasswordHash,
    pub avatar_url: String,
    pub cover_image_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        username: Username,
        email: Email,
        full_name: String,
        password_hash: PasswordHash,
        avatar_url: String,
        cover_image_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            full_name,
            password_hash,
            avatar_url,
            cover_image_url,
            created_at,
        }
    }
}
