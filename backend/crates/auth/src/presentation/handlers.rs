//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{client_key, extract_client_ip, extract_fingerprint};
use platform::rate_limit::LoginRateLimiter;

use crate::application::config::{AuthConfig, SameSite};
use crate::application::{CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase};
use crate::domain::repository::{AuthSessionRepository, OperatorRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{SessionStatusResponse, SignInRequest, SignInResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: OperatorRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub rate_limiter: Arc<LoginRateLimiter>,
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: OperatorRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;
    let limiter_key = client_key(&headers, Some(addr.ip()));

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.rate_limiter.clone(),
        state.config.clone(),
    );

    // req のムーブ後も使えるように remember_me を退避
    let remember_me = req.remember_me;

    let input = SignInInput {
        operator_name: req.operator_name,
        password: req.password,
        remember_me,
    };

    let output = use_case.execute(input, &limiter_key, fingerprint).await?;

    // Success - set session cookie (Max-Age must match remember_me)
    let cookie = build_session_cookie(&state.config, &output.session_token, remember_me);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            public_id: output.public_id,
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: OperatorRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = build_clear_cookie(&state.config);

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: OperatorRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session_info = if let Some(token) = token {
        use_case.execute(&token, &fingerprint.hash).await.ok()
    } else {
        None
    };

    match session_info {
        Some(info) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            public_id: Some(info.public_id),
            expires_at_ms: Some(info.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            public_id: None,
            expires_at_ms: None,
        })),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}

fn build_session_cookie(config: &AuthConfig, token: &str, remember_me: bool) -> String {
    let max_age = if remember_me {
        config.session_ttl_long.as_secs()
    } else {
        config.session_ttl_short.as_secs()
    };

    let mut parts = vec![
        format!("{}={}", config.session_cookie_name, token),
        "HttpOnly".to_string(),
        "Path=/".to_string(),
        format!("Max-Age={}", max_age),
    ];

    if config.cookie_secure {
        parts.push("Secure".to_string());
    }

    match config.cookie_same_site {
        SameSite::Strict => parts.push("SameSite=Strict".to_string()),
        SameSite::Lax => parts.push("SameSite=Lax".to_string()),
        SameSite::None => parts.push("SameSite=None".to_string()),
    }

    parts.join("; ")
}

fn build_clear_cookie(config: &AuthConfig) -> String {
    let mut parts = vec![
        format!("{}=", config.session_cookie_name),
        "HttpOnly".to_string(),
        "Path=/".to_string(),
        "Max-Age=0".to_string(),
        "Expires=Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
    ];

    if config.cookie_secure {
        parts.push("Secure".to_string());
    }

    match config.cookie_same_site {
        SameSite::Strict => parts.push("SameSite=Strict".to_string()),
        SameSite::Lax => parts.push("SameSite=Lax".to_string()),
        SameSite::None => parts.push("SameSite=None".to_string()),
    }

    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_max_age_follows_remember_me() {
        let config = AuthConfig::default();

        let short = build_session_cookie(&config, "tok", false);
        assert!(short.contains(&format!("Max-Age={}", config.session_ttl_short.as_secs())));

        let long = build_session_cookie(&config, "tok", true);
        assert!(long.contains(&format!("Max-Age={}", config.session_ttl_long.as_secs())));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = AuthConfig::default();
        let cookie = build_clear_cookie(&config);
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.starts_with("mapos_session=;"));
    }
}
