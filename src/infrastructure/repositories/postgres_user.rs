// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Email, LoginIdentity, NewUser, PasswordHash, User, UserId, UserRepository, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const USER_COLUMNS: &str = "id, username, email, full_name, password_hash, avatar_url, \
                            cover_image_url, refresh_token, created_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    full_name: String,
    password_hash: String,
    avatar_url: String,
    cover_image_url: String,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            email: Email::new(row.email)?,
            full_name: row.full_name,
            password_hash: PasswordHash::new(row.password_hash)?,
            avatar_url: row.avatar_url,
            cover_image_url: row.cover_image_url,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            username,
            email,
            full_name,
            password_hash,
            avatar_url,
            cover_image_url,
            created_at,
        } = new_user;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (username, email, full_name, password_hash, avatar_url, \
             cover_image_url, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {USER_COLUMNS}",
        ))
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(&full_name)
        .bind(password_hash.as_str())
        .bind(&avatar_url)
        .bind(&cover_image_url)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_login(&self, identity: &LoginIdentity) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NOT NULL AND username = $1)
                OR ($2::text IS NOT NULL AND email = $2)
             LIMIT 1",
        ))
        .bind(identity.username.as_deref())
        .bind(identity.email.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> DomainResult<()> {
        // Single-column patch; the rest of the row is never rewritten here.
        sqlx::query("UPDATE users SET refresh_token = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(())
    }
}
