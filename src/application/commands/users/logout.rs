// src/application/commands/users/logout.rs
use super::UserCommandService;
use crate::{application::error::ApplicationResult, domain::user::UserId};

impl UserCommandService {
    /// Drop the refresh-token mirror for the user. Clearing an already
    /// cleared token is a no-op, so calling logout twice is harmless.
    pub async fn logout(&self, user_id: UserId) -> ApplicationResult<()> {
        self.user_repo.set_refresh_token(user_id, None).await?;
        Ok(())
    }
}
