//! Operator API on a separate bind address, guarded by a bearer token.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/network", get(get_network))
        .route("/admin/vault", get(get_vault))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeConfig;
    use crate::ledger::{NodeKey, ServiceHub};
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    fn router() -> Router {
        let mut config = NodeConfig::default();
        config.admin.enabled = true;
        config.admin.api_key = "secret".to_string();
        let (hub, _) = ServiceHub::from_config(&config, &NodeKey::random()).unwrap();
        setup_admin_router(AppState::new(config, hub))
    }

    fn get(path: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let response = router().oneshot(get("/admin/status", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_token_rejected() {
        let response = router().oneshot(get("/admin/vault", Some("nope"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_accepted() {
        let response = router().oneshot(get("/admin/network", Some("secret"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
