// Application state shared across all modules

use sqlx::SqlitePool;

/// Token issuance settings consumed by the auth service.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_ttl_secs: i64,
    pub mobile_ttl_secs: i64,
}

/// Application state: database pool plus token configuration.
///
/// Constructed once in `main` and passed to handlers through an
/// `Extension<Arc<RwLock<AppState>>>` layer. There is no process-wide
/// accessor; anything that needs the pool receives it explicitly.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_ttl_secs: i64,
    pub mobile_ttl_secs: i64,
}

impl AppState {
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            jwt_secret: self.jwt_secret.clone(),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
            access_ttl_secs: self.access_ttl_secs,
            mobile_ttl_secs: self.mobile_ttl_secs,
        }
    }
}
