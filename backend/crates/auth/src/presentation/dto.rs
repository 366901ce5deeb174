//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub operator_name: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub public_id: String,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub public_id: Option<String>,
    pub expires_at_ms: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_request_deserialization() {
        let json = r#"{"operatorName":"mehmet","password":"hunter2hunter2"}"#;
        let request: SignInRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.operator_name, "mehmet");
        assert_eq!(request.password, "hunter2hunter2");
        assert!(!request.remember_me); // defaults to false
    }

    #[test]
    fn test_sign_in_request_with_remember_me() {
        let json = r#"{"operatorName":"mehmet","password":"pw","rememberMe":true}"#;
        let request: SignInRequest = serde_json::from_str(json).unwrap();
        assert!(request.remember_me);
    }

    #[test]
    fn test_session_status_serialization() {
        let response = SessionStatusResponse {
            authenticated: true,
            public_id: Some("abc".to_string()),
            expires_at_ms: Some(1234567890000),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""authenticated":true"#));
        assert!(json.contains("publicId"));
        assert!(json.contains("expiresAtMs"));
    }
}
