// src/application/commands/users/register.rs
use super::UserCommandService;
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, LoginIdentity, NewUser, PasswordHash, User, Username},
};
use std::path::{Path, PathBuf};

pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    /// Local temp file written by the multipart layer, if a part arrived.
    pub avatar_path: Option<PathBuf>,
    pub cover_image_path: Option<PathBuf>,
}

impl UserCommandService {
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        ensure_required_fields(&command)?;

        let username = Username::new(&command.username)?;
        let email = Email::new(&command.email)?;

        self.ensure_identity_available(&username, &email).await?;

        let avatar_url = self.upload_avatar(command.avatar_path.as_deref()).await?;
        let cover_image_url = self
            .upload_cover_image(command.cover_image_path.as_deref())
            .await;

        let user = self
            .create_user(
                username,
                email,
                command.full_name.trim().to_owned(),
                &command.password,
                avatar_url,
                cover_image_url,
            )
            .await?;

        // Read the row back so the response reflects exactly what was stored.
        let created = self
            .user_repo
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| {
                ApplicationError::infrastructure("something went wrong while registering the user")
            })?;

        Ok(created.into())
    }

    async fn ensure_identity_available(
        &self,
        username: &Username,
        email: &Email,
    ) -> ApplicationResult<()> {
        let identity = LoginIdentity {
            username: Some(username.as_str().to_owned()),
            email: Some(email.as_str().to_owned()),
        };

        if self.user_repo.find_by_login(&identity).await?.is_some() {
            return Err(ApplicationError::conflict(
                "user with this username or email already exists",
            ));
        }

        Ok(())
    }

    /// The avatar is mandatory. A missing file and a rejected upload surface
    /// the same message; the caller cannot tell them apart.
    async fn upload_avatar(&self, path: Option<&Path>) -> ApplicationResult<String> {
        let path = path.ok_or_else(|| ApplicationError::validation("avatar file is required"))?;

        match self.media_storage.upload(path).await {
            Ok(stored) => Ok(stored.url),
            Err(err) => {
                tracing::warn!(error = %err, "avatar upload failed");
                Err(ApplicationError::validation("avatar file is required"))
            }
        }
    }

    /// The cover image is optional, and a failed upload is tolerated:
    /// the account is still created, just without a cover image.
    async fn upload_cover_image(&self, path: Option<&Path>) -> String {
        let Some(path) = path else {
            return String::new();
        };

        match self.media_storage.upload(path).await {
            Ok(stored) => stored.url,
            Err(err) => {
                tracing::warn!(error = %err, "cover image upload failed, continuing without");
                String::new()
            }
        }
    }

    async fn create_user(
        &self,
        username: Username,
        email: Email,
        full_name: String,
        password: &str,
        avatar_url: String,
        cover_image_url: String,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::new(
            username,
            email,
            full_name,
            password_hash,
            avatar_url,
            cover_image_url,
            self.clock.now(),
        );

        Ok(self.user_repo.insert(new_user).await?)
    }
}

fn ensure_required_fields(command: &RegisterUserCommand) -> ApplicationResult<()> {
    let required = [
        &command.username,
        &command.email,
        &command.full_name,
        &command.password,
    ];

    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApplicationError::validation("all fields are required"));
    }

    Ok(())
}
