// src/application/dto/auth.rs
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

/// The pair of opaque signed tokens handed to a client on login.
/// Only the refresh token is mirrored server-side (on the user row);
/// the access token is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairDto {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(with = "serde_time")]
    pub access_expires_at: DateTime<Utc>,
    pub access_expires_in: i64,
}

/// Identity established by verifying an access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// What gets signed into an access token.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}
