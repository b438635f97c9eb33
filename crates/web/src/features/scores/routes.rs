use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{get_scores, submit_score};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/entrants/:entrant_id/scores", post(submit_score))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/entrants/:entrant_id/scores", get(get_scores))
        .merge(protected)
}
