use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    Database,
    dto::engagement::{EngagementResponse, FavoriteResponse, LikeResponse, ViewResponse},
};
use uuid::Uuid;

use crate::error::WebResult;
use crate::middleware::caller::CurrentCaller;
use crate::state::EngineSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/entrants/{entrant_id}/engagement",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID"),
        ("x-user-id" = Option<Uuid>, Header, description = "Caller, if signed in")
    ),
    responses(
        (status = 200, description = "Like and view counters, plus the caller's own state when signed in", body = EngagementResponse),
        (status = 404, description = "Entrant not found")
    ),
    tag = "engagement"
)]
pub async fn get_engagement(
    State(db): State<Database>,
    State(settings): State<EngineSettings>,
    CurrentCaller(caller): CurrentCaller,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<EngagementResponse>> {
    let response =
        services::get_engagement(db.pool(), &caller, entrant_id, settings.today()).await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/entrants/{entrant_id}/like",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID"),
        ("x-user-id" = Uuid, Header, description = "Caller")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Like recorded", body = LikeResponse),
        (status = 401, description = "Missing identity or API key"),
        (status = 404, description = "Entrant not found"),
        (status = 409, description = "Already liked today")
    ),
    tag = "engagement"
)]
pub async fn like(
    State(db): State<Database>,
    State(settings): State<EngineSettings>,
    CurrentCaller(caller): CurrentCaller,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<LikeResponse>> {
    let response = services::like(db.pool(), &caller, entrant_id, settings.today()).await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/entrants/{entrant_id}/favorite",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID"),
        ("x-user-id" = Uuid, Header, description = "Caller")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Favorite flipped", body = FavoriteResponse),
        (status = 401, description = "Missing identity or API key"),
        (status = 404, description = "Entrant not found")
    ),
    tag = "engagement"
)]
pub async fn toggle_favorite(
    State(db): State<Database>,
    CurrentCaller(caller): CurrentCaller,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<FavoriteResponse>> {
    Ok(Json(
        services::toggle_favorite(db.pool(), &caller, entrant_id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/entrants/{entrant_id}/favorite",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID"),
        ("x-user-id" = Uuid, Header, description = "Caller")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Entrant is a favorite; `changed` is false if it already was", body = FavoriteResponse),
        (status = 401, description = "Missing identity or API key"),
        (status = 404, description = "Entrant not found")
    ),
    tag = "engagement"
)]
pub async fn add_favorite(
    State(db): State<Database>,
    CurrentCaller(caller): CurrentCaller,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<FavoriteResponse>> {
    Ok(Json(
        services::add_favorite(db.pool(), &caller, entrant_id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/entrants/{entrant_id}/favorite",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID"),
        ("x-user-id" = Uuid, Header, description = "Caller")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Entrant is not a favorite; `changed` is false if it already was not", body = FavoriteResponse),
        (status = 401, description = "Missing identity or API key")
    ),
    tag = "engagement"
)]
pub async fn remove_favorite(
    State(db): State<Database>,
    CurrentCaller(caller): CurrentCaller,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<FavoriteResponse>> {
    Ok(Json(
        services::remove_favorite(db.pool(), &caller, entrant_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/entrants/{entrant_id}/views",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "View counted", body = ViewResponse),
        (status = 404, description = "Entrant not found")
    ),
    tag = "engagement"
)]
pub async fn record_view(
    State(db): State<Database>,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<ViewResponse>> {
    Ok(Json(services::record_view(db.pool(), entrant_id).await?))
}
