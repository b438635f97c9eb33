use axum::{Router, routing::get};

use super::handlers::{get_competition, get_ranking, list_competitions};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_competitions))
        .route("/:competition_id", get(get_competition))
        .route("/:competition_id/ranking", get(get_ranking))
}
