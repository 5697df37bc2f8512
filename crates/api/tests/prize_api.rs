//! HTTP-level integration tests for the `/raffles/{id}/prizes` endpoints,
//! exercised against a stub raffle backend on a random local port.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete_req, get_req, post_json, put_json, spawn_backend_stub};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: create appends at the next free place and forwards the write
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_prize_appends_at_next_place() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = post_json(
        app,
        "/api/v1/raffles/1/prizes",
        json!({
            "prize_type": "prize_raffle",
            "amount": 500.0,
            "description": "Weekend getaway",
            "draw_date": "2025-06-20T12:00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    // Stub has prizes at places 1 and 2, so the draft lands at 3.
    assert_eq!(json["data"]["Int_Place"], 3);
    assert_eq!(json["data"]["Int_Prize_Type"], 2);
    assert_eq!(json["data"]["Dt_Draw"], "2025-06-20 12:00:00");
    assert_eq!(json["data"]["Int_Prize_ID"], 99);
}

// ---------------------------------------------------------------------------
// Test: a second top prize is rejected before any write
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_second_top_prize_rejected() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = post_json(
        app,
        "/api/v1/raffles/1/prizes",
        json!({
            "place": 1,
            "prize_type": "fifty_fifty",
            "amount": 0.5,
            "draw_date": "2025-07-02 12:00:00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["violations"][0]["code"], "NotExactlyOneTopPrize");
    assert_eq!(json["violations"][0]["count"], 2);
}

// ---------------------------------------------------------------------------
// Test: inline edit is validated against siblings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_prize_ok() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = put_json(
        app,
        "/api/v1/raffles/1/prizes/12",
        json!({
            "place": 2,
            "prize_type": "early_bird",
            "amount": 300.0,
            "description": "Early bird draw",
            "draw_date": "2025-06-10T09:00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["Int_Prize_ID"], 12);
    assert_eq!(json["data"]["Dec_Value"], 300.0);
}

#[tokio::test]
async fn test_update_prize_draw_after_top_draw_rejected() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = put_json(
        app,
        "/api/v1/raffles/1/prizes/12",
        json!({
            "place": 2,
            "prize_type": "early_bird",
            "amount": 250.0,
            "draw_date": "2025-07-05 12:00:00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["violations"][0]["code"], "DrawDateOutOfRange");
    assert_eq!(json["violations"][0]["place"], 2);
}

#[tokio::test]
async fn test_update_missing_prize_is_404() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = put_json(
        app,
        "/api/v1/raffles/1/prizes/999",
        json!({
            "place": 2,
            "prize_type": "early_bird",
            "amount": 250.0,
            "draw_date": "2025-06-10 09:00:00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: delete guard blocks the top prize before the upstream delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_top_prize_blocked() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = delete_req(app, "/api/v1/raffles/1/prizes/11").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "The top prize cannot be deleted");
}

#[tokio::test]
async fn test_delete_non_top_prize_ok() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = delete_req(app, "/api/v1/raffles/1/prizes/12").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 12);
}

#[tokio::test]
async fn test_delete_missing_prize_is_404() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = delete_req(app, "/api/v1/raffles/1/prizes/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: next-place helper
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_next_place() {
    let backend = spawn_backend_stub().await;
    let app = build_test_app(&backend);

    let response = get_req(app, "/api/v1/raffles/1/prizes/next-place").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["next_place"], 3);
}
