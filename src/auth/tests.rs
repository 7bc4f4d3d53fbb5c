//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT token generation and validation
//! - DTO wire shapes (OAuth2 field naming, null preservation)
//! - Credential verification and refresh-token rotation

#[cfg(test)]
mod tests {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use std::sync::Arc;

    use crate::auth::models::{AuthRequest, Claims, OAuthResponse, RefreshRequest, User};
    use crate::auth::repository::{AuthRepository, SqliteAuthRepository};
    use crate::auth::service::{is_admin_role, scopes_for, AuthService, TokenProfile};
    use crate::common::id_generator::generate_user_id;
    use crate::common::state::TokenConfig;
    use crate::common::{migrations, ApiError};

    fn test_config() -> TokenConfig {
        TokenConfig {
            jwt_secret: "test_secret_key".to_string(),
            issuer: "record-api".to_string(),
            audience: "record-clients".to_string(),
            access_ttl_secs: 900,
            mobile_ttl_secs: 86_400,
        }
    }

    async fn test_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    async fn seed_user(pool: &SqlitePool, username: &str, password: &str, role: &str) {
        let repo = SqliteAuthRepository::new(pool.clone());
        let user = User {
            id: generate_user_id(),
            username: username.to_string(),
            password_hash: bcrypt::hash(password, 4).expect("Failed to hash password"),
            role: role.to_string(),
            refresh_token: None,
            created_at: None,
        };
        repo.insert(&user).await.expect("Failed to insert user");
    }

    fn service(pool: &SqlitePool) -> AuthService {
        AuthService::new(
            Arc::new(SqliteAuthRepository::new(pool.clone())),
            test_config(),
        )
    }

    #[tokio::test]
    async fn test_jwt_round_trip() {
        let pool = test_pool().await;
        let auth = service(&pool);

        let token = auth
            .generate_jwt_token("test-user", "admin", TokenProfile::Desktop)
            .expect("Failed to encode token");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["record-api"]);
        validation.set_audience(&["record-clients"]);

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test_secret_key".as_bytes()),
            &validation,
        )
        .expect("Failed to decode token");

        assert_eq!(decoded.claims.sub, "test-user");
        assert_eq!(decoded.claims.role, "admin");
        assert!(decoded.claims.exp > decoded.claims.iat);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 900);
    }

    #[tokio::test]
    async fn test_jwt_validation_fails_with_wrong_secret() {
        let pool = test_pool().await;
        let auth = service(&pool);

        let token = auth
            .generate_jwt_token("test-user", "user", TokenProfile::Desktop)
            .expect("Failed to encode token");

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("wrong_secret_key".as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        assert!(
            result.is_err(),
            "Token validation should fail with wrong secret"
        );
    }

    #[tokio::test]
    async fn test_jwt_validation_fails_with_wrong_audience() {
        let pool = test_pool().await;
        let auth = service(&pool);

        let token = auth
            .generate_jwt_token("test-user", "user", TokenProfile::Desktop)
            .expect("Failed to encode token");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["someone-else"]);

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test_secret_key".as_bytes()),
            &validation,
        );

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_refresh_token_shape() {
        let pool = test_pool().await;
        let auth = service(&pool);

        let first = auth.generate_refresh_token();
        let second = auth.generate_refresh_token();

        // 32 bytes of entropy, base64url without padding
        assert_eq!(first.len(), 43);
        assert!(!first.contains('='));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_login_issues_bundle() {
        let pool = test_pool().await;
        seed_user(&pool, "jdoe", "hunter2", "user").await;

        let bundle = service(&pool)
            .login(AuthRequest {
                username: Some("jdoe".to_string()),
                password: Some("hunter2".to_string()),
            })
            .await
            .expect("Login should succeed");

        assert!(bundle.access_token.is_some());
        assert_eq!(bundle.token_type.as_deref(), Some("Bearer"));
        assert_eq!(bundle.expires_in, Some(900));
        assert!(bundle.refresh_token.is_some());
        assert_eq!(bundle.role.as_deref(), Some("user"));
        assert_eq!(
            bundle.scopes,
            Some(vec!["records:read".to_string()])
        );
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password() {
        let pool = test_pool().await;
        seed_user(&pool, "jdoe", "hunter2", "user").await;

        let result = service(&pool)
            .login(AuthRequest {
                username: Some("jdoe".to_string()),
                password: Some("wrong".to_string()),
            })
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_user() {
        let pool = test_pool().await;

        let result = service(&pool)
            .login(AuthRequest {
                username: Some("nobody".to_string()),
                password: Some("whatever".to_string()),
            })
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_blank_fields() {
        let pool = test_pool().await;

        let result = service(&pool)
            .login(AuthRequest {
                username: None,
                password: None,
            })
            .await;

        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_mobile_bundle_has_offline_scope_and_long_ttl() {
        let pool = test_pool().await;
        seed_user(&pool, "jdoe", "hunter2", "admin").await;

        let bundle = service(&pool)
            .mobile(AuthRequest {
                username: Some("jdoe".to_string()),
                password: Some("hunter2".to_string()),
            })
            .await
            .expect("Mobile login should succeed");

        assert_eq!(bundle.expires_in, Some(86_400));
        let scopes = bundle.scopes.expect("scopes should be present");
        assert!(scopes.contains(&"records:write".to_string()));
        assert!(scopes.contains(&"offline".to_string()));
    }

    #[tokio::test]
    async fn test_refresh_rotates_stored_token() {
        let pool = test_pool().await;
        seed_user(&pool, "jdoe", "hunter2", "user").await;
        let auth = service(&pool);

        let bundle = auth
            .login(AuthRequest {
                username: Some("jdoe".to_string()),
                password: Some("hunter2".to_string()),
            })
            .await
            .expect("Login should succeed");
        let first_refresh = bundle.refresh_token.expect("refresh token expected");

        let renewed = auth
            .refresh_token(RefreshRequest {
                username: Some("jdoe".to_string()),
                refresh_token: Some(first_refresh.clone()),
            })
            .await
            .expect("Refresh should succeed");

        assert_ne!(renewed.refresh_token.as_deref(), Some(first_refresh.as_str()));

        // The rotated-out token is no longer accepted
        let replay = auth
            .refresh_token(RefreshRequest {
                username: Some("jdoe".to_string()),
                refresh_token: Some(first_refresh),
            })
            .await;
        assert!(matches!(replay, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_store_refresh_token_unknown_user() {
        let pool = test_pool().await;
        let repo = SqliteAuthRepository::new(pool.clone());

        let result = repo.store_refresh_token("nobody", "token").await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_role_scopes() {
        assert!(is_admin_role("admin"));
        assert!(is_admin_role("superadmin"));
        assert!(!is_admin_role("user"));

        let scopes = scopes_for("admin", TokenProfile::Desktop);
        assert_eq!(scopes, vec!["records:read", "records:write"]);

        let scopes = scopes_for("user", TokenProfile::Mobile);
        assert_eq!(scopes, vec!["records:read", "offline"]);
    }

    #[test]
    fn test_oauth_response_preserves_nulls() {
        let response = OAuthResponse {
            access_token: Some("token".to_string()),
            token_type: Some("Bearer".to_string()),
            expires_in: None,
            refresh_token: None,
            role: None,
            scopes: None,
        };

        let json = serde_json::to_string(&response).expect("Failed to serialize");
        assert!(json.contains("\"expires_in\":null"));
        assert!(json.contains("\"refresh_token\":null"));
        assert!(json.contains("\"role\":null"));
        assert!(json.contains("\"scopes\":null"));

        let parsed: OAuthResponse = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(parsed.access_token.as_deref(), Some("token"));
        assert!(parsed.refresh_token.is_none());
    }

    #[test]
    fn test_auth_request_tolerates_missing_fields() {
        let parsed: AuthRequest = serde_json::from_str("{}").expect("Failed to deserialize");
        assert!(parsed.username.is_none());
        assert!(parsed.password.is_none());

        let parsed: RefreshRequest =
            serde_json::from_str(r#"{"username":"jdoe"}"#).expect("Failed to deserialize");
        assert_eq!(parsed.username.as_deref(), Some("jdoe"));
        assert!(parsed.refresh_token.is_none());
    }
}
