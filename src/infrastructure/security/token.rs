// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthenticatedUser, TokenPairDto, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Signs and verifies the session token pair. Both tokens are sealed
/// Biscuits issued from one process-wide root key, injected here at
/// construction; the access and refresh tokens differ in TTL and in the
/// facts they carry.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(
        private_key_hex: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            access_ttl,
            refresh_ttl,
        })
    }

    fn build_access_token(
        &self,
        subject: &TokenSubject,
        issued_at: SystemTime,
        expires_at: SystemTime,
    ) -> ApplicationResult<String> {
        let mut params: HashMap<String, Term> = HashMap::new();
        params.insert("uid".to_string(), i64::from(subject.user_id).into());
        params.insert("uname".to_string(), subject.username.clone().into());
        params.insert("uemail".to_string(), subject.email.clone().into());
        params.insert("issued".to_string(), issued_at.into());
        params.insert("exp".to_string(), expires_at.into());

        let code = r#"
            user({uid}, {uname});
            email({uemail});
            issued_at({issued});
            expires_at({exp});
            token_type("access");
            check if token_type("access");
            check if time($now), $now >= {issued};
            check if time($now), $now <= {exp};
            "#;

        build_and_serialize_biscuit(code, params, self.root.as_ref())
    }

    fn build_refresh_token(
        &self,
        subject: &TokenSubject,
        issued_at: SystemTime,
        expires_at: SystemTime,
    ) -> ApplicationResult<String> {
        let mut params: HashMap<String, Term> = HashMap::new();
        params.insert("uid".to_string(), i64::from(subject.user_id).into());
        params.insert("issued".to_string(), issued_at.into());
        params.insert("exp".to_string(), expires_at.into());

        // Identity only; no username/email facts leave the server on the
        // long-lived token.
        let code = r#"
            user_id({uid});
            issued_at({issued});
            expires_at({exp});
            token_type("refresh");
            check if token_type("refresh");
            check if time($now), $now >= {issued};
            check if time($now), $now <= {exp};
            "#;

        build_and_serialize_biscuit(code, params, self.root.as_ref())
    }

    fn authorize(&self, token: &str) -> ApplicationResult<Biscuit> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        Ok(biscuit)
    }
}

fn expires_after(issued_at: SystemTime, ttl: Duration) -> ApplicationResult<SystemTime> {
    issued_at
        .checked_add(ttl)
        .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))
}

fn seal_and_serialize(token: Biscuit) -> Result<String, ApplicationError> {
    let sealed = token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
    sealed
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

fn build_and_serialize_biscuit(
    code: &str,
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> Result<String, ApplicationError> {
    let builder = Biscuit::builder()
        .code_with_params(code, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    let token = builder
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    seal_and_serialize(token)
}

fn ttl_to_expires_in_seconds(ttl: Duration) -> i64 {
    ChronoDuration::from_std(ttl)
        .unwrap_or_else(|_| ChronoDuration::seconds(ttl.as_secs() as i64))
        .num_seconds()
        .max(0)
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue_pair(&self, subject: TokenSubject) -> ApplicationResult<TokenPairDto> {
        let issued_at = SystemTime::now();
        let access_expires_at = expires_after(issued_at, self.access_ttl)?;
        let refresh_expires_at = expires_after(issued_at, self.refresh_ttl)?;

        let access_token = self.build_access_token(&subject, issued_at, access_expires_at)?;
        let refresh_token = self.build_refresh_token(&subject, issued_at, refresh_expires_at)?;

        Ok(TokenPairDto {
            access_token,
            refresh_token,
            access_expires_at: DateTime::<Utc>::from(access_expires_at),
            access_expires_in: ttl_to_expires_in_seconds(self.access_ttl),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = self.authorize(token)?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        super::claims::parse_access_claims(facts)
    }

    async fn verify_refresh(&self, token: &str) -> ApplicationResult<UserId> {
        let biscuit = self.authorize(token)?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        super::claims::parse_refresh_claims(facts)
    }
}
