//! Operator Entity
//!
//! The single back-office account that manages customers, products and
//! quotations. Credentials live on the entity itself; there is no
//! self-service registration surface.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{
    operator_id::OperatorId, operator_name::OperatorName, public_id::PublicId,
};

/// Operator account entity
#[derive(Debug, Clone)]
pub struct Operator {
    /// Internal ID
    pub operator_id: OperatorId,
    /// Public ID for API responses
    pub public_id: PublicId,
    /// Sign-in name
    pub operator_name: OperatorName,
    /// Argon2id password hash
    pub password_hash: HashedPassword,
    /// Last successful sign-in
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Operator {
    /// Create a new operator account
    pub fn new(operator_name: OperatorName, password_hash: HashedPassword) -> Self {
        let now = Utc::now();
        Self {
            operator_id: OperatorId::new(),
            public_id: PublicId::new(),
            operator_name,
            password_hash,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a successful sign-in
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Replace the password hash
    pub fn update_password(&mut self, new_hash: HashedPassword) {
        self.password_hash = new_hash;
        self.updated_at = Utc::now();
    }
}
