//! Route definitions for the prize-rule and prize resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::prizes;
use crate::state::AppState;

/// Routes mounted at `/prize-rules`.
///
/// ```text
/// POST /validate   -> validate_prize_list   (dry-run, no backend calls)
/// ```
pub fn rules_router() -> Router<AppState> {
    Router::new().route("/validate", post(prizes::validate_prize_list))
}

/// Routes mounted at `/raffles`.
///
/// ```text
/// POST   /{raffle_id}/prizes               -> create_prize
/// GET    /{raffle_id}/prizes/next-place    -> next_place
/// PUT    /{raffle_id}/prizes/{prize_id}    -> update_prize
/// DELETE /{raffle_id}/prizes/{prize_id}    -> delete_prize
/// ```
pub fn raffle_prize_router() -> Router<AppState> {
    Router::new()
        .route("/{raffle_id}/prizes", post(prizes::create_prize))
        .route("/{raffle_id}/prizes/next-place", get(prizes::next_place))
        .route(
            "/{raffle_id}/prizes/{prize_id}",
            put(prizes::update_prize).delete(prizes::delete_prize),
        )
}
