//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// User database model: the authenticated principal
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub refresh_token: Option<String>,
    pub created_at: Option<String>,
}

/// Credential payload for the login and mobile flows.
///
/// Fields are optional on the wire; presence is enforced by validation so a
/// missing field produces a field-level error rather than a 422 from the
/// deserializer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Payload for exchanging a stored refresh token for a new bundle.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RefreshRequest {
    pub username: Option<String>,
    pub refresh_token: Option<String>,
}

/// OAuth2-shaped token bundle returned by every auth flow.
///
/// Field names follow OAuth2 conventions; `Option` fields serialize as
/// explicit nulls so clients see every declared field.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OAuthResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub role: Option<String>,
    pub scopes: Option<Vec<String>>,
}
