//! Auth Session Entity
//!
//! Represents an authenticated operator session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::{operator_id::OperatorId, public_id::PublicId};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to Operator
    pub operator_id: OperatorId,
    /// Public ID for API responses
    pub public_id: PublicId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Whether "Remember Me" was checked
    pub remember_me: bool,
    /// Client fingerprint hash (User-Agent based)
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP (optional, for logging)
    pub client_ip: Option<String>,
    /// User agent string (for session management display)
    pub user_agent: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        operator_id: OperatorId,
        public_id: PublicId,
        remember_me: bool,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            operator_id,
            public_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            remember_me,
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Extend session if "Remember Me" is enabled
    ///
    /// The extension policy is intentionally simple:
    /// - only applies to remember_me sessions
    /// - extend to (now + ttl_long) when remaining time falls below half of ttl_long
    pub fn extend_if_needed(&mut self, ttl_long: Duration) {
        if !self.remember_me {
            return;
        }

        let now = Utc::now();
        let new_expires = (now + ttl_long).timestamp_millis();

        // Only extend if less than half the TTL remains
        if self.expires_at_ms < (now + (ttl_long / 2)).timestamp_millis() {
            self.expires_at_ms = new_expires;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(remember_me: bool, ttl: Duration) -> AuthSession {
        AuthSession::new(
            OperatorId::new(),
            PublicId::new(),
            remember_me,
            vec![0u8; 32],
            Some("127.0.0.1".to_string()),
            Some("test-agent".to_string()),
            ttl,
        )
    }

    #[test]
    fn test_new_session_not_expired() {
        let s = session(false, Duration::hours(12));
        assert!(!s.is_expired());
        assert!(s.remaining_ms() > 0);
    }

    #[test]
    fn test_expired_session() {
        let mut s = session(false, Duration::hours(12));
        s.expires_at_ms = Utc::now().timestamp_millis() - 1_000;
        assert!(s.is_expired());
        assert_eq!(s.remaining_ms(), 0);
    }

    #[test]
    fn test_extend_only_for_remember_me() {
        let ttl = Duration::days(7);

        let mut plain = session(false, Duration::hours(1));
        let before = plain.expires_at_ms;
        plain.extend_if_needed(ttl);
        assert_eq!(plain.expires_at_ms, before);

        let mut remembered = session(true, Duration::hours(1));
        remembered.extend_if_needed(ttl);
        assert!(remembered.expires_at_ms > (Utc::now() + Duration::days(6)).timestamp_millis());
    }

    #[test]
    fn test_no_extension_while_plenty_remains() {
        let ttl = Duration::days(7);
        let mut s = session(true, Duration::days(7));
        let before = s.expires_at_ms;
        s.extend_if_needed(ttl);
        assert_eq!(s.expires_at_ms, before);
    }
}
