//! Domain models for users and their sessions.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique across all users
    pub email: String,
    /// "salt_hex:digest_hex" produced by the auth service
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// A bearer-token session. Tokens are opaque random values; expiry is
/// enforced on every lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_expiry_boundary() {
        let now = Utc::now();
        let session = Session {
            token: "token".to_string(),
            user_id: "user".to_string(),
            created_at: now,
            expires_at: now + Duration::days(30),
        };

        assert!(!session.is_expired(now));
        assert!(!session.is_expired(now + Duration::days(29)));
        // Expiry instant itself is no longer valid
        assert!(session.is_expired(now + Duration::days(30)));
        assert!(session.is_expired(now + Duration::days(31)));
    }
}
