// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn parse_access_claims(
    facts: Vec<biscuit_auth::builder::Fact>,
) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);

    if ctx.token_type.as_deref() != Some("access") {
        return Err(ApplicationError::unauthorized("not an access token"));
    }

    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
    let username = ctx
        .username
        .ok_or_else(|| ApplicationError::unauthorized("missing username"))?;
    let email = ctx
        .email
        .ok_or_else(|| ApplicationError::unauthorized("missing email"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    Ok(AuthenticatedUser {
        id: UserId::new(user_id)?,
        username,
        email,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

pub fn parse_refresh_claims(
    facts: Vec<biscuit_auth::builder::Fact>,
) -> ApplicationResult<UserId> {
    let ctx = ClaimsContext::from_facts(facts);

    if ctx.token_type.as_deref() != Some("refresh") {
        return Err(ApplicationError::unauthorized("not a refresh token"));
    }

    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;

    Ok(UserId::new(user_id)?)
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    email: Option<String>,
    token_type: Option<String>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<biscuit_auth::builder::Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: biscuit_auth::builder::Predicate) {
        match predicate.name.as_str() {
            "user" => self.handle_user(&predicate),
            "user_id" => self.handle_user_id(&predicate),
            "email" => self.handle_email(&predicate),
            "token_type" => self.handle_token_type(&predicate),
            "issued_at" => self.issued_at = date_term(&predicate),
            "expires_at" => self.expires_at = date_term(&predicate),
            _ => {}
        }
    }

    fn handle_user(&mut self, predicate: &biscuit_auth::builder::Predicate) {
        if predicate.terms.len() == 2 {
            if let biscuit_auth::builder::Term::Integer(id) = predicate.terms[0] {
                self.user_id = Some(id);
            }
            if let biscuit_auth::builder::Term::Str(name) = predicate.terms[1].clone() {
                self.username = Some(name);
            }
        }
    }

    fn handle_user_id(&mut self, predicate: &biscuit_auth::builder::Predicate) {
        if let Some(biscuit_auth::builder::Term::Integer(id)) = predicate.terms.first() {
            self.user_id = Some(*id);
        }
    }

    fn handle_email(&mut self, predicate: &biscuit_auth::builder::Predicate) {
        if let Some(biscuit_auth::builder::Term::Str(email)) = predicate.terms.first() {
            self.email = Some(email.clone());
        }
    }

    fn handle_token_type(&mut self, predicate: &biscuit_auth::builder::Predicate) {
        if let Some(biscuit_auth::builder::Term::Str(kind)) = predicate.terms.first() {
            self.token_type = Some(kind.clone());
        }
    }
}

fn date_term(predicate: &biscuit_auth::builder::Predicate) -> Option<SystemTime> {
    match predicate.terms.first() {
        Some(biscuit_auth::builder::Term::Date(seconds)) => {
            Some(UNIX_EPOCH + std::time::Duration::from_secs(*seconds))
        }
        _ => None,
    }
}
