//! Wire models for the record API
//!
//! The client keeps its own copies of the request/response shapes; field
//! names follow the server's OAuth2-style naming and `Option` fields
//! round-trip as explicit nulls.

use serde::{Deserialize, Serialize};

/// Credential payload for `/auth/login` and `/auth/mobile`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Payload for `/auth/refresh`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RefreshRequest {
    pub username: Option<String>,
    pub refresh_token: Option<String>,
}

impl RefreshRequest {
    pub fn new(username: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }
}

/// OAuth2-shaped token bundle returned by every auth flow.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OAuthResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub role: Option<String>,
    pub scopes: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Payload for create and full-replace update.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RecordDraft {
    pub title: String,
    pub body: Option<String>,
}

/// Envelope returned by the list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RemovedResponse {
    pub removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_response_round_trips_nulls() {
        let json = r#"{
            "access_token": "abc",
            "token_type": "Bearer",
            "expires_in": 900,
            "refresh_token": null,
            "role": null,
            "scopes": null
        }"#;

        let parsed: OAuthResponse = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(parsed.access_token.as_deref(), Some("abc"));
        assert!(parsed.refresh_token.is_none());

        let out = serde_json::to_string(&parsed).expect("Failed to serialize");
        assert!(out.contains("\"refresh_token\":null"));
        assert!(out.contains("\"scopes\":null"));
    }

    #[test]
    fn test_auth_request_serializes_all_fields() {
        let request = AuthRequest::new("jdoe", "hunter2");
        let json = serde_json::to_string(&request).expect("Failed to serialize");
        assert!(json.contains("\"username\":\"jdoe\""));
        assert!(json.contains("\"password\":\"hunter2\""));
    }
}
