// src/application/commands/users/service.rs
use std::sync::Arc;

use crate::application::{
    dto::{TokenPairDto, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::{
        media::MediaStorage,
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
};
use crate::domain::user::{User, UserRepository};

pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) media_storage: Arc<dyn MediaStorage>,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        media_storage: Arc<dyn MediaStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            token_manager,
            media_storage,
            clock,
        }
    }

    /// Sign a token pair for the user and mirror the refresh token onto the
    /// user row (targeted patch, no entity re-validation). Whatever goes
    /// wrong here is internal; callers get an opaque infrastructure error
    /// so signing details never reach the client.
    pub(super) async fn issue_session_tokens(&self, user: &User) -> ApplicationResult<TokenPairDto> {
        let subject = TokenSubject {
            user_id: user.id,
            username: user.username.to_string(),
            email: user.email.to_string(),
        };

        let issued = async {
            let pair = self.token_manager.issue_pair(subject).await?;
            self.user_repo
                .set_refresh_token(user.id, Some(&pair.refresh_token))
                .await?;
            Ok::<_, ApplicationError>(pair)
        }
        .await;

        issued.map_err(|err| {
            tracing::error!(error = %err, user_id = i64::from(user.id), "token issuance failed");
            ApplicationError::infrastructure(
                "something went wrong while generating refresh and access tokens",
            )
        })
    }
}
