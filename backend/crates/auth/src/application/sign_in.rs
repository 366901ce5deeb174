//! Sign In Use Case
//!
//! Rate-limits the client, authenticates the operator, and creates a session.
//!
//! The rate limiter runs before any credential work and counts the attempt
//! regardless of outcome; a successful sign-in clears the client's window so
//! the operator is not penalized by earlier typos.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::rate_limit::LoginRateLimiter;

use crate::application::config::AuthConfig;
use crate::application::token::sign_session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, OperatorRepository};
use crate::domain::value_object::operator_name::OperatorName;
use crate::error::{AuthError, AuthResult};

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign in input
pub struct SignInInput {
    /// Operator name
    pub operator_name: String,
    /// Password
    pub password: String,
    /// Remember me flag
    pub remember_me: bool,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    /// Public ID
    pub public_id: String,
}

/// Sign in use case
pub struct SignInUseCase<R, S>
where
    R: OperatorRepository,
    S: AuthSessionRepository,
{
    operator_repo: Arc<R>,
    session_repo: Arc<S>,
    rate_limiter: Arc<LoginRateLimiter>,
    config: Arc<AuthConfig>,
}

impl<R, S> SignInUseCase<R, S>
where
    R: OperatorRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        operator_repo: Arc<R>,
        session_repo: Arc<S>,
        rate_limiter: Arc<LoginRateLimiter>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            operator_repo,
            session_repo,
            rate_limiter,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        client_key: &str,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        // Abuse check comes first; denied clients never reach credential work
        let decision = self.rate_limiter.check(client_key);
        if !decision.allowed {
            return Err(AuthError::RateLimited {
                reset_at_ms: decision.reset_at_ms,
            });
        }

        let operator_name = OperatorName::new(&input.operator_name)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let operator = self
            .operator_repo
            .find_by_name(&operator_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        let raw_password = ClearTextPassword::new(input.password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let password_valid = operator
            .password_hash
            .verify(&raw_password, self.config.pepper());

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        // Legitimate client: clear the attempt window
        self.rate_limiter.reset(client_key);

        // Update operator's last login
        let mut operator = operator;
        operator.record_login();
        self.operator_repo.update(&operator).await?;

        // Create session
        let ttl = if input.remember_me {
            self.config.session_ttl_long
        } else {
            self.config.session_ttl_short
        };
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = AuthSession::new(
            operator.operator_id,
            operator.public_id,
            input.remember_me,
            fingerprint.hash_vec(),
            fingerprint.ip_string(),
            fingerprint.user_agent.clone(),
            ttl,
        );

        self.session_repo.create(&session).await?;

        let session_token = sign_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            public_id = %operator.public_id,
            session_id = %session.session_id,
            remember_me = input.remember_me,
            "Operator signed in"
        );

        Ok(SignInOutput {
            session_token,
            public_id: operator.public_id.to_string(),
        })
    }
}
