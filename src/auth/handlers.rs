//! Authentication handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{AuthRequest, OAuthResponse, RefreshRequest};
use super::repository::SqliteAuthRepository;
use super::service::AuthService;
use crate::common::{ApiError, AppState};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        Arc::new(SqliteAuthRepository::new(state.db.clone())),
        state.token_config(),
    )
}

/// POST /auth/login
/// Authenticates a user and returns an OAuth2-shaped token bundle
///
/// # Request Body
/// ```json
/// {
///   "username": "jdoe",
///   "password": "secret"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "access_token": "<jwt>",
///   "token_type": "Bearer",
///   "expires_in": 900,
///   "refresh_token": "<opaque token>",
///   "role": "user",
///   "scopes": ["records:read"]
/// }
/// ```
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<OAuthResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let bundle = auth_service(&state).login(payload).await?;
    Ok(Json(bundle))
}

/// POST /auth/mobile
/// Mobile login flow: same credential check, longer-lived access token and
/// an `offline` scope in the bundle
pub async fn mobile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<OAuthResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let bundle = auth_service(&state).mobile(payload).await?;
    Ok(Json(bundle))
}

/// POST /auth/refresh
/// Exchanges a stored refresh token for a new bundle. The presented token is
/// invalidated by the rotation.
pub async fn refresh(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<OAuthResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let bundle = auth_service(&state).refresh_token(payload).await?;
    Ok(Json(bundle))
}
