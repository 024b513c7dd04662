// tests/support/mocks/repos.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use clipstream_core::domain::errors::{DomainError, DomainResult};
use clipstream_core::domain::user::{
    LoginIdentity, NewUser, User, UserId, UserRepository,
};

/// In-memory user store. Enforces the same username/email uniqueness the
/// Postgres schema enforces with unique indexes.
pub struct InMemoryUserRepo {
    inner: Mutex<Inner>,
}

struct Inner {
    users: HashMap<i64, User>,
    next_id: i64,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| i64::from(u.id)).max().unwrap_or(0) + 1;
        let users = users.into_iter().map(|u| (i64::from(u.id), u)).collect();
        Self {
            inner: Mutex::new(Inner { users, next_id }),
        }
    }

    pub fn count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.inner.lock().unwrap().users.get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut inner = self.inner.lock().unwrap();

        let duplicate = inner.users.values().any(|u| {
            u.username.as_str() == new_user.username.as_str()
                || u.email.as_str() == new_user.email.as_str()
        });
        if duplicate {
            return Err(DomainError::Conflict("unique constraint violated".into()));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let user = User {
            id: UserId::new(id).expect("positive test id"),
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            password_hash: new_user.password_hash,
            avatar_url: new_user.avatar_url,
            cover_image_url: new_user.cover_image_url,
            refresh_token: None,
            created_at: new_user.created_at,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(&i64::from(id)).cloned())
    }

    async fn find_by_login(&self, identity: &LoginIdentity) -> DomainResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|u| {
                identity
                    .username
                    .as_deref()
                    .is_some_and(|name| u.username.as_str() == name)
                    || identity
                        .email
                        .as_deref()
                        .is_some_and(|email| u.email.as_str() == email)
            })
            .cloned())
    }

    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> DomainResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.get_mut(&i64::from(id)) {
            user.refresh_token = token.map(str::to_owned);
        }
        Ok(())
    }
}
