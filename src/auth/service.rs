//! Credential verification and token issuance

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rand::RngCore;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::models::{AuthRequest, Claims, OAuthResponse, RefreshRequest};
use super::repository::AuthRepository;
use crate::common::{safe_username_log, ApiError, ValidationResult};

pub use crate::common::state::TokenConfig;

/// Token lifetime/scope profile per client type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenProfile {
    Desktop,
    Mobile,
}

/// Roles granted write access to records.
pub fn is_admin_role(role: &str) -> bool {
    matches!(role, "admin" | "superadmin")
}

/// Scopes carried in the token bundle, derived from role and client profile.
pub fn scopes_for(role: &str, profile: TokenProfile) -> Vec<String> {
    let mut scopes = vec!["records:read".to_string()];
    if is_admin_role(role) {
        scopes.push("records:write".to_string());
    }
    if profile == TokenProfile::Mobile {
        scopes.push("offline".to_string());
    }
    scopes
}

pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    config: TokenConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, config: TokenConfig) -> Self {
        Self { repo, config }
    }

    /// Authenticate with username/password and issue a desktop token bundle.
    pub async fn login(&self, request: AuthRequest) -> Result<OAuthResponse, ApiError> {
        let (username, password) = credentials(request)?;
        let role = self.verify_user(&username, &password).await?;
        self.generate_oauth_data(&username, &role, TokenProfile::Desktop)
            .await
    }

    /// Authenticate with username/password and issue a mobile token bundle
    /// (longer access-token lifetime, `offline` scope).
    pub async fn mobile(&self, request: AuthRequest) -> Result<OAuthResponse, ApiError> {
        let (username, password) = credentials(request)?;
        let role = self.verify_user(&username, &password).await?;
        self.generate_oauth_data(&username, &role, TokenProfile::Mobile)
            .await
    }

    /// Exchange a stored refresh token for a fresh bundle. The stored token
    /// rotates: after success, the presented token no longer verifies.
    pub async fn refresh_token(&self, request: RefreshRequest) -> Result<OAuthResponse, ApiError> {
        let (username, refresh_token) = refresh_fields(request)?;
        let role = self.verify_refresh_token(&username, &refresh_token).await?;
        self.generate_oauth_data(&username, &role, TokenProfile::Desktop)
            .await
    }

    /// Verify credentials and return the user's role.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// endpoint cannot be used to probe for accounts.
    pub async fn verify_user(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("invalid credentials".to_string()))?;

        let matches = bcrypt::verify(password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Password hash verification failed");
            ApiError::InternalServer("credential verification failed".to_string())
        })?;

        if !matches {
            warn!(
                username = %safe_username_log(username),
                "Login rejected: bad password"
            );
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }

        Ok(user.role)
    }

    /// Verify a refresh token belongs to the user and return the role.
    pub async fn verify_refresh_token(
        &self,
        username: &str,
        refresh_token: &str,
    ) -> Result<String, ApiError> {
        let user = self
            .repo
            .find_by_username_and_token(username, refresh_token)
            .await?
            .ok_or_else(|| {
                warn!(
                    username = %safe_username_log(username),
                    "Refresh rejected: no matching stored token"
                );
                ApiError::Unauthorized("invalid refresh token".to_string())
            })?;

        Ok(user.role)
    }

    /// Issue a signed HS256 access token carrying username and role.
    pub fn generate_jwt_token(
        &self,
        username: &str,
        role: &str,
        profile: TokenProfile,
    ) -> Result<String, ApiError> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_for(profile) as usize,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            error!(error = %e, "JWT encoding error");
            ApiError::InternalServer("jwt error".to_string())
        })
    }

    /// Generate a new opaque refresh token: 32 random bytes, base64url.
    pub fn generate_refresh_token(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Issue a full bundle for the user and persist the new refresh token.
    /// Each issuance overwrites the previous stored token.
    pub async fn generate_oauth_data(
        &self,
        username: &str,
        role: &str,
        profile: TokenProfile,
    ) -> Result<OAuthResponse, ApiError> {
        let access_token = self.generate_jwt_token(username, role, profile)?;
        let refresh_token = self.generate_refresh_token();

        self.repo
            .store_refresh_token(username, &refresh_token)
            .await?;

        info!(
            username = %safe_username_log(username),
            profile = ?profile,
            "Issued token bundle"
        );

        Ok(OAuthResponse {
            access_token: Some(access_token),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(self.ttl_for(profile)),
            refresh_token: Some(refresh_token),
            role: Some(role.to_string()),
            scopes: Some(scopes_for(role, profile)),
        })
    }

    fn ttl_for(&self, profile: TokenProfile) -> i64 {
        match profile {
            TokenProfile::Desktop => self.config.access_ttl_secs,
            TokenProfile::Mobile => self.config.mobile_ttl_secs,
        }
    }
}

/// Pull username/password out of the request, rejecting blank fields.
fn credentials(request: AuthRequest) -> Result<(String, String), ApiError> {
    let mut result = ValidationResult::new();
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    if username.trim().is_empty() {
        result.add_error("username", "username is required");
    }
    if password.is_empty() {
        result.add_error("password", "password is required");
    }

    if !result.is_valid {
        return Err(ApiError::from(result));
    }

    Ok((username, password))
}

fn refresh_fields(request: RefreshRequest) -> Result<(String, String), ApiError> {
    let mut result = ValidationResult::new();
    let username = request.username.unwrap_or_default();
    let refresh_token = request.refresh_token.unwrap_or_default();

    if username.trim().is_empty() {
        result.add_error("username", "username is required");
    }
    if refresh_token.is_empty() {
        result.add_error("refresh_token", "refresh_token is required");
    }

    if !result.is_valid {
        return Err(ApiError::from(result));
    }

    Ok((username, refresh_token))
}
