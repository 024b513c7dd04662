// src/application/commands/users/login.rs
use super::UserCommandService;
use crate::{
    application::{
        dto::{TokenPairDto, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{LoginIdentity, User, Username},
};

pub struct LoginUserCommand {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginResult {
    pub user: UserDto,
    pub tokens: TokenPairDto,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let identity = build_identity(&command)?;

        let user = self
            .user_repo
            .find_by_login(&identity)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user does not exist"))?;

        self.verify_password(&user, &command.password).await?;

        let tokens = self.issue_session_tokens(&user).await?;

        Ok(LoginResult {
            user: user.into(),
            tokens,
        })
    }

    async fn verify_password(&self, user: &User, password: &str) -> ApplicationResult<()> {
        self.password_hasher
            .verify(password, user.password_hash.as_str())
            .await
            .map_err(|_| ApplicationError::unauthorized("invalid credentials"))
    }
}

/// Either identity field is enough to log in. Usernames are normalized the
/// same way registration normalizes them so lookups agree.
fn build_identity(command: &LoginUserCommand) -> ApplicationResult<LoginIdentity> {
    let username = command
        .username
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(Username::new)
        .transpose()?
        .map(String::from);

    let email = command
        .email
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    let identity = LoginIdentity { username, email };
    if identity.is_empty() {
        return Err(ApplicationError::validation(
            "username or email is required",
        ));
    }

    Ok(identity)
}
