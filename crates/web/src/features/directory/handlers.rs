use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    Database,
    models::{Entrant, Judge, Team},
};
use uuid::Uuid;

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/judges/{judge_id}",
    params(
        ("judge_id" = Uuid, Path, description = "Judge ID")
    ),
    responses(
        (status = 200, description = "Judge found", body = Judge),
        (status = 404, description = "Judge not found")
    ),
    tag = "directory"
)]
pub async fn get_judge(
    State(db): State<Database>,
    Path(judge_id): Path<Uuid>,
) -> WebResult<Json<Judge>> {
    Ok(Json(services::get_judge(db.pool(), judge_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = Uuid, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team with its apps in submission order", body = Team),
        (status = 404, description = "Team not found")
    ),
    tag = "directory"
)]
pub async fn get_team(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> WebResult<Json<Team>> {
    Ok(Json(services::get_team(db.pool(), team_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/entrants/{entrant_id}",
    params(
        ("entrant_id" = Uuid, Path, description = "Entrant ID")
    ),
    responses(
        (status = 200, description = "Entrant found", body = Entrant),
        (status = 404, description = "Entrant not found")
    ),
    tag = "directory"
)]
pub async fn get_entrant(
    State(db): State<Database>,
    Path(entrant_id): Path<Uuid>,
) -> WebResult<Json<Entrant>> {
    Ok(Json(services::get_entrant(db.pool(), entrant_id).await?))
}
