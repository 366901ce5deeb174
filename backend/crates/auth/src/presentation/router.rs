//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::rate_limit::LoginRateLimiter;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, OperatorRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAuthRepository,
    config: AuthConfig,
    rate_limiter: Arc<LoginRateLimiter>,
) -> Router {
    auth_router_generic(repo, config, rate_limiter)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(
    repo: R,
    config: AuthConfig,
    rate_limiter: Arc<LoginRateLimiter>,
) -> Router
where
    R: OperatorRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        rate_limiter,
    };

    Router::new()
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/signout", post(handlers::sign_out::<R>))
        .route("/status", get(handlers::session_status::<R>))
        .with_state(state)
}
