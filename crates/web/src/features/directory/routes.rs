use axum::{Router, routing::get};

use super::handlers::{get_entrant, get_judge, get_team};
use crate::state::AppState;

/// Lookups by id. Mounted at the API root because they span three
/// resources.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/judges/:judge_id", get(get_judge))
        .route("/teams/:team_id", get(get_team))
        .route("/entrants/:entrant_id", get(get_entrant))
}
