//! Handlers for prize validation and orchestration endpoints.
//!
//! All rule decisions happen in `tombola_core::prize_rules`; these handlers
//! fetch context from the upstream backend, run the engine, and forward
//! accepted writes. No prize payload reaches the backend unvalidated.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tombola_core::error::CoreError;
use tombola_core::prize::{Prize, PrizeDraft};
use tombola_core::prize_rules::{self, PrizeRuleViolation};
use tombola_core::raffle::SaleWindow;
use tombola_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /prize-rules/validate — wizard dry-run over a full prize list
// ---------------------------------------------------------------------------

/// Body for the wizard's bulk dry-run validation. The raffle may not exist
/// yet, so the sale window travels with the request.
#[derive(Debug, Deserialize)]
pub struct ValidatePrizeListRequest {
    pub sale_open: String,
    pub sale_close: String,
    pub prizes: Vec<PrizeDraft>,
}

/// Validate a full replacement prize list without touching the backend.
///
/// Returns the normalized write payloads on success, or 422 with every
/// violated rule.
pub async fn validate_prize_list(
    Json(body): Json<ValidatePrizeListRequest>,
) -> AppResult<impl IntoResponse> {
    let window = SaleWindow::from_raw(&body.sale_open, &body.sale_close)?;
    if window.sale_close <= window.sale_open {
        return Err(AppError::BadRequest(
            "sale close must be after sale open".to_string(),
        ));
    }

    let normalized = prize_rules::normalize_and_validate_prize_list(&body.prizes, &window)
        .map_err(AppError::Rules)?;

    let payloads: Vec<_> = normalized.iter().map(|p| p.to_write_payload()).collect();
    Ok(Json(DataResponse { data: payloads }))
}

// ---------------------------------------------------------------------------
// POST /raffles/{id}/prizes — validate and create one prize
// ---------------------------------------------------------------------------

/// Validate a new prize against the raffle's current set and forward the
/// write. A draft with `place == 0` is appended at the next free place.
pub async fn create_prize(
    State(state): State<AppState>,
    Path(raffle_id): Path<DbId>,
    Json(mut draft): Json<PrizeDraft>,
) -> AppResult<impl IntoResponse> {
    let raffle = state.backend.fetch_raffle(raffle_id).await?;
    let window = raffle.sale_window()?;
    let existing = fetch_prize_set(&state, raffle_id).await?;

    if draft.place == 0 {
        draft.place = prize_rules::compute_next_place(&existing);
    }

    let normalized =
        prize_rules::normalize_and_validate_prize_update(&draft, &window, &existing, None)
            .map_err(AppError::Rules)?;

    // Whole-set guard over the resulting list before anything is persisted.
    let mut resulting = existing;
    resulting.push(normalized.as_prize(0));
    prize_rules::validate_all_prizes(&resulting, &window).map_err(AppError::Rules)?;

    let created = state
        .backend
        .create_prize(raffle_id, &normalized.to_write_payload())
        .await?;
    tracing::info!(raffle_id, place = normalized.place, "Created prize");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// PUT /raffles/{id}/prizes/{prize_id} — validate and update one prize
// ---------------------------------------------------------------------------

/// Validate an inline edit against the raffle's current set (excluding the
/// edited prize from its own sibling list) and forward the write.
pub async fn update_prize(
    State(state): State<AppState>,
    Path((raffle_id, prize_id)): Path<(DbId, DbId)>,
    Json(draft): Json<PrizeDraft>,
) -> AppResult<impl IntoResponse> {
    let raffle = state.backend.fetch_raffle(raffle_id).await?;
    let window = raffle.sale_window()?;
    let existing = fetch_prize_set(&state, raffle_id).await?;

    if !existing.iter().any(|p| p.id == prize_id) {
        return Err(CoreError::NotFound {
            entity: "prize",
            id: prize_id,
        }
        .into());
    }

    let normalized = prize_rules::normalize_and_validate_prize_update(
        &draft,
        &window,
        &existing,
        Some(prize_id),
    )
    .map_err(AppError::Rules)?;

    let mut resulting: Vec<Prize> = existing.into_iter().filter(|p| p.id != prize_id).collect();
    resulting.push(normalized.as_prize(prize_id));
    prize_rules::validate_all_prizes(&resulting, &window).map_err(AppError::Rules)?;

    let updated = state
        .backend
        .update_prize(prize_id, &normalized.to_write_payload())
        .await?;
    tracing::info!(raffle_id, prize_id, "Updated prize");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /raffles/{id}/prizes/{prize_id} — guarded delete
// ---------------------------------------------------------------------------

/// Delete a non-top prize. The top prize anchors every other draw date and
/// is never deletable; the backend's own delete endpoint does not enforce
/// this, so the guard lives here.
pub async fn delete_prize(
    State(state): State<AppState>,
    Path((raffle_id, prize_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let existing = fetch_prize_set(&state, raffle_id).await?;
    let prize = existing
        .iter()
        .find(|p| p.id == prize_id)
        .ok_or(CoreError::NotFound {
            entity: "prize",
            id: prize_id,
        })?;

    if !prize_rules::can_delete_prize(prize) {
        return Err(AppError::Core(CoreError::Conflict(
            PrizeRuleViolation::CannotDeleteTopPrize.to_string(),
        )));
    }

    state.backend.delete_prize(prize_id).await?;
    tracing::info!(raffle_id, prize_id, "Deleted prize");

    Ok(Json(DataResponse {
        data: json!({ "deleted": prize_id }),
    }))
}

// ---------------------------------------------------------------------------
// GET /raffles/{id}/prizes/next-place — append helper for the wizard
// ---------------------------------------------------------------------------

/// Next free place number for appending a prize to this raffle.
pub async fn next_place(
    State(state): State<AppState>,
    Path(raffle_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = fetch_prize_set(&state, raffle_id).await?;
    let next = prize_rules::compute_next_place(&existing);

    Ok(Json(DataResponse {
        data: json!({ "next_place": next }),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch the raffle's prize list and convert every record to the domain
/// type. A record the domain rejects is an upstream data problem, not a
/// user error.
async fn fetch_prize_set(state: &AppState, raffle_id: DbId) -> Result<Vec<Prize>, AppError> {
    let records = state.backend.list_prizes(raffle_id).await?;
    let mut prizes = Vec::with_capacity(records.len());
    for record in &records {
        prizes.push(record.to_prize()?);
    }
    Ok(prizes)
}
