//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real application router via `tower::ServiceExt` and,
//! where a handler needs the upstream raffle backend, a stub backend
//! served on a random local port.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Path;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tombola_api::backend::BackendClient;
use tombola_api::config::ServerConfig;
use tombola_api::router::build_app_router;
use tombola_api::state::AppState;

/// Build a test `ServerConfig` pointed at the given backend URL.
pub fn test_config(backend_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend_base_url: backend_url.to_string(),
        backend_client_id: "test-client".to_string(),
        backend_client_secret: "test-secret".to_string(),
        token_refresh_margin_secs: 60,
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(backend_url: &str) -> Router {
    let config = Arc::new(test_config(backend_url));
    let backend = Arc::new(BackendClient::from_config(&config));
    let state = AppState {
        config: Arc::clone(&config),
        backend,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Stub raffle backend
// ---------------------------------------------------------------------------

/// Serve a stub raffle backend on a random port and return its base URL.
///
/// Raffle 1 sells tickets from `2025-06-01 00:00:00` to
/// `2025-06-30 18:00:00` and has two prizes: the top 50/50 (id 11, drawn
/// `2025-07-01 12:00:00`) and an early bird (id 12, place 2). Writes echo
/// the received payload back with an id.
pub async fn spawn_backend_stub() -> String {
    let app = Router::new()
        .route(
            "/auth/token",
            post(|| async { Json(json!({ "token": "stub-token", "expires_in": 3600 })) }),
        )
        .route(
            "/raffles/{id}",
            get(|| async {
                Json(json!({
                    "Int_Raffle_ID": 1,
                    "Dt_SalesOpen": "2025-06-01 00:00:00",
                    "Dt_SalesClose": "2025-06-30 18:00:00",
                }))
            }),
        )
        .route(
            "/raffles/{id}/prizes",
            get(|| async { Json(stub_prizes()) }).post(
                |Json(mut body): Json<Value>| async move {
                    body["Int_Prize_ID"] = json!(99);
                    (StatusCode::CREATED, Json(body))
                },
            ),
        )
        .route(
            "/prizes/{id}",
            put(|Path(id): Path<i64>, Json(mut body): Json<Value>| async move {
                body["Int_Prize_ID"] = json!(id);
                Json(body)
            })
            .delete(|| async { StatusCode::NO_CONTENT }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Stub backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub backend error");
    });

    format!("http://{addr}")
}

fn stub_prizes() -> Value {
    json!([
        {
            "Int_Prize_ID": 11,
            "Int_Place": 1,
            "Int_Prize_Type": 1,
            "Int_PrizeValuePercent": 1,
            "Dec_Value": 0.5,
            "VC_Description": "50% of Total Jackpot",
            "Dt_Draw": "2025-07-01 12:00:00",
        },
        {
            "Int_Prize_ID": 12,
            "Int_Place": 2,
            "Int_Prize_Type": 3,
            "Int_PrizeValuePercent": 0,
            "Dec_Value": 250.0,
            "VC_Description": "Early bird draw",
            "Dt_Draw": "2025-06-15 12:00:00",
        },
    ])
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get_req(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn delete_req(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
