//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::{Claims, User};
use super::service::is_admin_role;
use crate::common::{safe_username_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Validates the bearer JWT (signature, expiry, issuer, audience) and loads
/// the user row so a token for a since-deleted account is rejected.
#[derive(Debug)]
pub struct AuthedUser {
    pub username: String,
    pub role: String,
    pub is_admin: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        // Extract Bearer token from Authorization header
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let token = match token {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        // Handle "Bearer <token>" format or raw token
        let bare_token = if let Some(rest) = token.strip_prefix("Bearer ") {
            rest.to_string()
        } else {
            token
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&app_state.issuer]);
        validation.set_audience(&[&app_state.audience]);

        let decoded = match decode::<Claims>(
            &bare_token,
            &DecodingKey::from_secret(app_state.jwt_secret.as_bytes()),
            &validation,
        ) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "JWT token validation failed");
                return Err(ApiError::Unauthorized("invalid token".into()));
            }
        };

        let username = decoded.claims.sub;

        // Look up user in database
        let user: Option<User> =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
                .bind(&username)
                .fetch_optional(&app_state.db)
                .await
                .map_err(|e| {
                    error!(
                        error = %e,
                        username = %safe_username_log(&username),
                        "Database error during user lookup in authentication"
                    );
                    ApiError::DatabaseError(e)
                })?;

        match user {
            Some(u) => {
                let is_admin = is_admin_role(&u.role);
                debug!(
                    username = %safe_username_log(&u.username),
                    role = %u.role,
                    is_admin = is_admin,
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser {
                    username: u.username,
                    role: u.role,
                    is_admin,
                })
            }
            None => {
                warn!(
                    username = %safe_username_log(&username),
                    "Authentication failed: user not found in database"
                );
                Err(ApiError::Unauthorized("user not found".into()))
            }
        }
    }
}
