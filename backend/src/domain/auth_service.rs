//! Authentication: account creation, login, and bearer-session validation.
//!
//! Passwords are stored as salted HMAC-SHA256 digests ("salt_hex:digest_hex").
//! Sessions are opaque random tokens with a fixed TTL, checked on every
//! lookup.
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::models::user::{Session, User};
use crate::storage::{DbConnection, UserRepository};

type HmacSha256 = Hmac<Sha256>;

const SESSION_TTL_DAYS: i64 = 30;
const SALT_LEN: usize = 16;
const TOKEN_LEN: usize = 32;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone)]
pub struct AuthService {
    repository: UserRepository,
}

impl AuthService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: UserRepository::new(db),
        }
    }

    /// Create an account and open its first session.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, Session), DomainError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.is_empty() {
            return Err(DomainError::InvalidInput("name must not be empty".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::InvalidInput("email is not valid".to_string()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::InvalidInput(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.repository.find_user_by_email(&email).await?.is_some() {
            return Err(DomainError::InvalidInput(
                "email is already registered".to_string(),
            ));
        }

        let user = User {
            id: User::generate_id(),
            name: name.to_string(),
            email,
            password_hash: hash_password(password),
            created_at: Utc::now(),
        };
        self.repository.store_user(&user).await?;
        info!("Created user {}", user.id);

        let session = self.issue_session(&user).await?;
        Ok((user, session))
    }

    /// Exchange credentials for a fresh session. Unknown email and wrong
    /// password produce the same answer.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, Session), DomainError> {
        let email = email.trim().to_lowercase();

        let user = match self.repository.find_user_by_email(&email).await? {
            Some(user) if verify_password(password, &user.password_hash) => user,
            _ => {
                return Err(DomainError::Unauthorized(
                    "invalid email or password".to_string(),
                ))
            }
        };

        let session = self.issue_session(&user).await?;
        info!("User {} logged in", user.id);
        Ok((user, session))
    }

    /// Resolve a bearer token to its user. Expired sessions are removed on
    /// sight.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let session = self
            .repository
            .find_session(token)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("invalid session token".to_string()))?;

        if session.is_expired(Utc::now()) {
            self.repository.delete_session(token).await?;
            return Err(DomainError::Unauthorized("session expired".to_string()));
        }

        self.repository
            .find_user_by_id(&session.user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("invalid session token".to_string()))
    }

    async fn issue_session(&self, user: &User) -> Result<Session, DomainError> {
        let now = Utc::now();
        let session = Session {
            token: generate_token(),
            user_id: user.id.clone(),
            created_at: now,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        };
        self.repository.store_session(&session).await?;
        Ok(session)
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    format!("{}:{}", hex::encode(salt), hex::encode(digest(password, &salt)))
}

fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once(':') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    hex::encode(digest(password, &salt)) == digest_hex
}

fn digest(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts keys of any length");
    mac.update(password.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
