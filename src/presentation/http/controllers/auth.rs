// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::users::{LoginUserCommand, RefreshTokenCommand, RegisterUserCommand},
    dto::{TokenPairDto, UserDto},
};
use crate::presentation::http::envelope::ApiResponse;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    ACCESS_TOKEN_COOKIE, Authenticated, REFRESH_TOKEN_COOKIE,
};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Multipart};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserDto,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Multipart registration: string fields plus optional `avatar` and
/// `coverImage` files, spooled to the upload dir for the media handoff.
pub async fn register(
    Extension(state): Extension<HttpState>,
    mut multipart: Multipart,
) -> HttpResult<ApiResponse<UserDto>> {
    let mut command = RegisterUserCommand {
        username: String::new(),
        email: String::new(),
        full_name: String::new(),
        password: String::new(),
        avatar_path: None,
        cover_image_path: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::bad_request(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "username" => command.username = text_field(field).await?,
            "email" => command.email = text_field(field).await?,
            "fullname" | "fullName" => command.full_name = text_field(field).await?,
            "password" => command.password = text_field(field).await?,
            "avatar" => {
                command.avatar_path = Some(spool_upload(&state.upload_dir, field).await?);
            }
            "coverImage" => {
                command.cover_image_path = Some(spool_upload(&state.upload_dir, field).await?);
            }
            _ => {}
        }
    }

    let user = state
        .services
        .user_commands
        .register(command)
        .await
        .into_http()?;

    Ok(ApiResponse::created(user, "user registered successfully"))
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<(CookieJar, ApiResponse<SessionResponse>)> {
    let command = LoginUserCommand {
        username: payload.username,
        email: payload.email,
        password: payload.password,
    };

    let result = state
        .services
        .user_commands
        .login(command)
        .await
        .into_http()?;

    let jar = set_session_cookies(jar, &result.tokens);

    let body = SessionResponse {
        user: result.user,
        access_token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
    };

    Ok((jar, ApiResponse::ok(body, "user logged in successfully")))
}

pub async fn logout(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    jar: CookieJar,
) -> HttpResult<(CookieJar, ApiResponse<serde_json::Value>)> {
    state
        .services
        .user_commands
        .logout(user.id)
        .await
        .into_http()?;

    let jar = clear_session_cookies(jar);

    Ok((
        jar,
        ApiResponse::ok(serde_json::json!({}), "user logged out"),
    ))
}

pub async fn refresh_token(
    Extension(state): Extension<HttpState>,
    jar: CookieJar,
    payload: Option<Json<RefreshRequest>>,
) -> HttpResult<(CookieJar, ApiResponse<RefreshedTokens>)> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .or_else(|| payload.and_then(|Json(body)| body.refresh_token))
        .ok_or_else(|| HttpError::unauthorized("refresh token is required"))?;

    let tokens = state
        .services
        .user_commands
        .refresh_session(RefreshTokenCommand { token })
        .await
        .into_http()?;

    let jar = set_session_cookies(jar, &tokens);

    let body = RefreshedTokens {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };

    Ok((jar, ApiResponse::ok(body, "session refreshed")))
}

pub async fn me(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<UserDto>> {
    state
        .services
        .user_queries
        .current_user(&user)
        .await
        .into_http()
        .map(|dto| ApiResponse::ok(dto, "current user fetched"))
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> HttpResult<String> {
    field
        .text()
        .await
        .map_err(|err| HttpError::bad_request(err.to_string()))
}

/// Write an uploaded part to the spool directory under a fresh name,
/// keeping the original extension so the media service can sniff the type.
async fn spool_upload(
    upload_dir: &Path,
    field: axum::extract::multipart::Field<'_>,
) -> HttpResult<PathBuf> {
    let extension = field
        .file_name()
        .and_then(|name| Path::new(name).extension())
        .map(|ext| ext.to_string_lossy().into_owned());

    let file_name = match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    };

    let bytes = field
        .bytes()
        .await
        .map_err(|err| HttpError::bad_request(err.to_string()))?;

    let path = upload_dir.join(file_name);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|err| HttpError::from_error(crate::application::error::ApplicationError::infrastructure(err.to_string())))?;

    Ok(path)
}

fn set_session_cookies(jar: CookieJar, tokens: &TokenPairDto) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        tokens.refresh_token.clone(),
    ))
}

fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(REFRESH_TOKEN_COOKIE))
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .path("/")
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}
