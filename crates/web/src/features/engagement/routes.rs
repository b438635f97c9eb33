use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    add_favorite, get_engagement, like, record_view, remove_favorite, toggle_favorite,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/entrants/:entrant_id/like", post(like))
        .route(
            "/entrants/:entrant_id/favorite",
            post(toggle_favorite)
                .put(add_favorite)
                .delete(remove_favorite),
        )
        .route("/entrants/:entrant_id/views", post(record_view))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/entrants/:entrant_id/engagement", get(get_engagement))
        .merge(protected)
}
