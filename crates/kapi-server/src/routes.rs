//! Provider API handlers
//!
//! Provides endpoints for:
//! - Provider configuration
//! - Credential checks
//! - Login and configuration dialog descriptors
//! - Health

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use kapi_core::types::{AuthOutcome, ConfigurePayload, ErrorResponse, LoginPayload};
use serde::Serialize;
use tracing::{debug, warn};

use crate::server::AppState;

// ============================================================================
// Handlers
// ============================================================================

/// POST /configure - Replace the provider configuration
pub async fn configure(
    State(state): State<AppState>,
    payload: Result<Json<ConfigurePayload>, JsonRejection>,
) -> Response {
    debug!("POST /configure");

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };

    state.provider.configure(&payload);
    Json(state.provider.config_info()).into_response()
}

/// POST /authenticate - Validate credentials
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };

    debug!("POST /authenticate username={}", payload.username);

    let outcome = state.provider.authenticate(&payload).await;
    let status = match outcome {
        AuthOutcome::Success(_) => StatusCode::OK,
        AuthOutcome::Failure(_) => StatusCode::UNAUTHORIZED,
    };

    (status, Json(outcome)).into_response()
}

/// GET /login-info - Login dialog fields
pub async fn login_info(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /login-info");
    Json(state.provider.login_info())
}

/// GET /config-info - Current configuration and editable fields
pub async fn config_info(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /config-info");
    Json(state.provider.config_info())
}

/// GET /health - Liveness check
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: kapi_core::VERSION,
    })
}

/// Unreadable request bodies are reported in the same `errorMessage` shape
fn bad_request(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(rejection.body_text())),
    )
        .into_response()
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

// ============================================================================
// Router
// ============================================================================

/// Create provider routes
pub fn provider_routes(state: AppState) -> Router {
    Router::new()
        .route("/configure", post(configure))
        .route("/authenticate", post(authenticate))
        .route("/login-info", get(login_info))
        .route("/config-info", get(config_info))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use kapi_auth::{LdapAuthProvider, MemoryDirectory};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let provider = LdapAuthProvider::new(MemoryDirectory::forumsys());
        provider_routes(AppState {
            provider: Arc::new(provider),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let response = app()
            .oneshot(post_json(
                "/authenticate",
                json!({"username": "newton", "password": "password"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["roleNames"], json!(["Full access"]));
        assert_eq!(body["userIdentifier"], "newton");
        assert_eq!(body["keyLifetimeSeconds"], 3600);
        assert!(body.get("errorMessage").is_none());
    }

    #[tokio::test]
    async fn test_authenticate_failure_is_unauthorized() {
        let response = app()
            .oneshot(post_json(
                "/authenticate",
                json!({"username": "newton", "password": "apple"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert!(!body["errorMessage"].as_str().unwrap().is_empty());
        assert!(body.get("roleNames").is_none());
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_error_message() {
        let app = app();

        let requests = [
            post_json("/authenticate", json!({"username": null, "password": "password"})),
            Request::builder()
                .method("POST")
                .uri("/authenticate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
            post_json("/configure", json!({"keyLifetimeMinutes": "soon"})),
        ];

        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = body_json(response).await;
            assert!(!body["errorMessage"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_configure_accepts_any_number() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json("/configure", json!({"keyLifetimeMinutes": 30.0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["current"]["keyLifetimeMinutes"], 30);

        let response = app
            .oneshot(post_json("/configure", json!({"keyLifetimeMinutes": -5})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["current"]["keyLifetimeMinutes"], 60);
    }

    #[tokio::test]
    async fn test_configure_then_config_info() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json("/configure", json!({"keyLifetimeMinutes": 30})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/config-info")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(
            body["current"],
            json!({"serverName": "ldap://ldap.forumsys.com", "keyLifetimeMinutes": 30})
        );
        assert_eq!(body["fields"][0]["name"], "serverName");
    }

    #[tokio::test]
    async fn test_login_info() {
        let response = app().oneshot(get("/login-info")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["fields"][0]["name"], "username");
        assert_eq!(body["fields"][1]["type"], "password");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get("/health")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], kapi_core::VERSION);
    }
}
