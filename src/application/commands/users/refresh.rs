// src/application/commands/users/refresh.rs
use super::UserCommandService;
use crate::application::{
    dto::TokenPairDto,
    error::{ApplicationError, ApplicationResult},
};

pub struct RefreshTokenCommand {
    pub token: String,
}

impl UserCommandService {
    /// Exchange a refresh token for a new pair. The presented token must
    /// both verify cryptographically and match the mirror stored on the
    /// user row; a rotated-out or logged-out token fails the second check.
    pub async fn refresh_session(
        &self,
        command: RefreshTokenCommand,
    ) -> ApplicationResult<TokenPairDto> {
        let user_id = self.token_manager.verify_refresh(&command.token).await?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid refresh token"))?;

        if user.refresh_token.as_deref() != Some(command.token.as_str()) {
            return Err(ApplicationError::unauthorized(
                "refresh token is expired or already used",
            ));
        }

        self.issue_session_tokens(&user).await
    }
}
