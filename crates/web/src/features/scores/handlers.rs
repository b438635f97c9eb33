use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use storage::{
    Database,
    dto::score::{ScoreSummaryResponse, SubmitScoreRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebResult;
use crate::middleware::caller::CurrentCaller;
use crate::state::EngineSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/entrants/{entrant_id}/scores",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID")
    ),
    responses(
        (status = 200, description = "Judge scores and aggregate for the entrant", body = ScoreSummaryResponse),
        (status = 404, description = "Entrant not found")
    ),
    tag = "scores"
)]
pub async fn get_scores(
    State(db): State<Database>,
    State(settings): State<EngineSettings>,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<ScoreSummaryResponse>> {
    let summary = services::get_score_summary(db.pool(), entrant_id, settings.weighting).await?;

    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/entrants/{entrant_id}/scores",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID"),
        ("x-user-id" = Uuid, Header, description = "Judge ID"),
        ("x-user-role" = String, Header, description = "Must be `judge`")
    ),
    request_body = SubmitScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score recorded, replacing this judge's previous score", body = ScoreSummaryResponse),
        (status = 400, description = "Malformed body, criterion out of range or empty comment"),
        (status = 401, description = "Missing identity or API key"),
        (status = 403, description = "Caller is not a judge assigned to this competition"),
        (status = 404, description = "Entrant not found")
    ),
    tag = "scores"
)]
pub async fn submit_score(
    State(db): State<Database>,
    State(settings): State<EngineSettings>,
    CurrentCaller(caller): CurrentCaller,
    Path(entrant_id): Path<Uuid>,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> WebResult<Json<ScoreSummaryResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let summary =
        services::submit_score(db.pool(), &caller, entrant_id, &req, settings.weighting).await?;

    Ok(Json(summary))
}
