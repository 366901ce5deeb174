//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, operator::Operator};
use crate::domain::repository::{AuthSessionRepository, OperatorRepository};
use crate::domain::value_object::{
    operator_id::OperatorId, operator_name::OperatorName, public_id::PublicId,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Operator Repository Implementation
// ============================================================================

impl OperatorRepository for PgAuthRepository {
    async fn create(&self, operator: &Operator) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO operators (
                operator_id,
                public_id,
                operator_name,
                operator_name_canonical,
                password_hash,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(operator.operator_id.as_uuid())
        .bind(operator.public_id.as_str())
        .bind(operator.operator_name.original())
        .bind(operator.operator_name.canonical())
        .bind(operator.password_hash.as_phc_string())
        .bind(operator.last_login_at)
        .bind(operator.created_at)
        .bind(operator.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, operator_id: &OperatorId) -> AuthResult<Option<Operator>> {
        let row = sqlx::query_as::<_, OperatorRow>(
            r#"
            SELECT
                operator_id,
                public_id,
                operator_name,
                password_hash,
                last_login_at,
                created_at,
                updated_at
            FROM operators
            WHERE operator_id = $1
            "#,
        )
        .bind(operator_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_operator()).transpose()
    }

    async fn find_by_name(&self, operator_name: &OperatorName) -> AuthResult<Option<Operator>> {
        let row = sqlx::query_as::<_, OperatorRow>(
            r#"
            SELECT
                operator_id,
                public_id,
                operator_name,
                password_hash,
                last_login_at,
                created_at,
                updated_at
            FROM operators
            WHERE operator_name_canonical = $1
            "#,
        )
        .bind(operator_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_operator()).transpose()
    }

    async fn exists_by_name(&self, operator_name: &OperatorName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM operators WHERE operator_name_canonical = $1)",
        )
        .bind(operator_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, operator: &Operator) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE operators SET
                operator_name = $2,
                operator_name_canonical = $3,
                password_hash = $4,
                last_login_at = $5,
                updated_at = $6
            WHERE operator_id = $1
            "#,
        )
        .bind(operator.operator_id.as_uuid())
        .bind(operator.operator_name.original())
        .bind(operator.operator_name.canonical())
        .bind(operator.password_hash.as_phc_string())
        .bind(operator.last_login_at)
        .bind(operator.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                operator_id,
                public_id,
                expires_at_ms,
                remember_me,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.session_id)
        .bind(session.operator_id.as_uuid())
        .bind(session.public_id.as_str())
        .bind(session.expires_at_ms)
        .bind(session.remember_me)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                operator_id,
                public_id,
                expires_at_ms,
                remember_me,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // Constant-time fingerprint comparison, not in SQL
        if !platform::crypto::constant_time_eq(&row.client_fingerprint_hash, fingerprint_hash) {
            tracing::warn!(session_id = %session_id, "Session fingerprint mismatch");
            return Err(AuthError::SessionFingerprintMismatch);
        }

        row.into_session().map(Some)
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_operator(
        &self,
        operator_id: &OperatorId,
        except: Option<Uuid>,
    ) -> AuthResult<u64> {
        let deleted = match except {
            Some(keep) => {
                sqlx::query(
                    "DELETE FROM auth_sessions WHERE operator_id = $1 AND session_id <> $2",
                )
                .bind(operator_id.as_uuid())
                .bind(keep)
                .execute(&self.pool)
                .await?
                .rows_affected()
            }
            None => {
                sqlx::query("DELETE FROM auth_sessions WHERE operator_id = $1")
                    .bind(operator_id.as_uuid())
                    .execute(&self.pool)
                    .await?
                    .rows_affected()
            }
        };

        Ok(deleted)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        PgAuthRepository::cleanup_expired(self).await
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct OperatorRow {
    operator_id: Uuid,
    public_id: String,
    operator_name: String,
    password_hash: String,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OperatorRow {
    fn into_operator(self) -> AuthResult<Operator> {
        let public_id = PublicId::parse_str(&self.public_id)
            .map_err(|e| AuthError::Internal(format!("Corrupt public_id in DB: {e}")))?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Corrupt password hash in DB: {e}")))?;

        Ok(Operator {
            operator_id: OperatorId::from_uuid(self.operator_id),
            public_id,
            operator_name: OperatorName::from_db(&self.operator_name),
            password_hash,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    operator_id: Uuid,
    public_id: String,
    expires_at_ms: i64,
    remember_me: bool,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        let public_id = PublicId::parse_str(&self.public_id)
            .map_err(|e| AuthError::Internal(format!("Corrupt public_id in DB: {e}")))?;

        Ok(AuthSession {
            session_id: self.session_id,
            operator_id: OperatorId::from_uuid(self.operator_id),
            public_id,
            expires_at_ms: self.expires_at_ms,
            remember_me: self.remember_me,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        })
    }
}
