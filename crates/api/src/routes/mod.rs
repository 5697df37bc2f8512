pub mod health;
pub mod prizes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /prize-rules/validate                    bulk dry-run validation (POST)
///
/// /raffles/{id}/prizes                     create prize (POST)
/// /raffles/{id}/prizes/next-place          next free place (GET)
/// /raffles/{id}/prizes/{prize_id}          update (PUT), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/prize-rules", prizes::rules_router())
        .nest("/raffles", prizes::raffle_prize_router())
}
