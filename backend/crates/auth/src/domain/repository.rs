//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{auth_session::AuthSession, operator::Operator};
use crate::domain::value_object::{operator_id::OperatorId, operator_name::OperatorName};
use crate::error::AuthResult;
use uuid::Uuid;

/// Operator repository trait
#[trait_variant::make(OperatorRepository: Send)]
pub trait LocalOperatorRepository {
    /// Create a new operator
    async fn create(&self, operator: &Operator) -> AuthResult<()>;

    /// Find operator by ID
    async fn find_by_id(&self, operator_id: &OperatorId) -> AuthResult<Option<Operator>>;

    /// Find operator by name
    async fn find_by_name(&self, operator_name: &OperatorName) -> AuthResult<Option<Operator>>;

    /// Check if an operator name exists
    async fn exists_by_name(&self, operator_name: &OperatorName) -> AuthResult<bool>;

    /// Update operator
    async fn update(&self, operator: &Operator) -> AuthResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID and verify fingerprint
    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Delete all sessions for an operator (except current)
    async fn delete_all_for_operator(
        &self,
        operator_id: &OperatorId,
        except: Option<Uuid>,
    ) -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
