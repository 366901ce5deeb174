//! Operator Provisioning Use Case
//!
//! There is no sign-up endpoint: the single operator account is created at
//! process start from environment configuration when it does not exist yet.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::operator::Operator;
use crate::domain::repository::OperatorRepository;
use crate::domain::value_object::operator_name::OperatorName;
use crate::error::{AuthError, AuthResult};

/// Provision operator use case
pub struct ProvisionOperatorUseCase<R>
where
    R: OperatorRepository,
{
    operator_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ProvisionOperatorUseCase<R>
where
    R: OperatorRepository,
{
    pub fn new(operator_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            operator_repo,
            config,
        }
    }

    /// Create the operator account if it does not exist
    ///
    /// Returns `true` when a new account was created. An existing account is
    /// left untouched: the configured password is NOT used to overwrite it.
    pub async fn execute(&self, name: &str, password: &str) -> AuthResult<bool> {
        let operator_name = OperatorName::new(name)
            .map_err(|e| AuthError::Internal(format!("Invalid operator name: {e}")))?;

        if self.operator_repo.exists_by_name(&operator_name).await? {
            tracing::debug!(operator = %operator_name, "Operator already provisioned");
            return Ok(false);
        }

        let password = ClearTextPassword::new(password.to_string())
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;

        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let operator = Operator::new(operator_name, password_hash);
        self.operator_repo.create(&operator).await?;

        tracing::info!(
            public_id = %operator.public_id,
            operator = %operator.operator_name,
            "Operator account provisioned"
        );

        Ok(true)
    }
}
