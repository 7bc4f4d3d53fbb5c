//! Authentication routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /auth/login` - Credential login (desktop bundle)
/// - `POST /auth/mobile` - Credential login (mobile bundle)
/// - `POST /auth/refresh` - Refresh-token exchange
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/login", post(handlers::login))
        .route("/auth/mobile", post(handlers::mobile))
        .route("/auth/refresh", post(handlers::refresh))
}
