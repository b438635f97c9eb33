use axum::{
    Json,
    extract::{Path, Query, State},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        competition::{CompetitionDetailResponse, CompetitionListFilter, CompetitionResponse},
        ranking::{CompetitionRanking, RankingQuery},
    },
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::state::EngineSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions",
    params(CompetitionListFilter),
    responses(
        (status = 200, description = "Competitions, newest first", body = PaginatedResponse<CompetitionResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
    Query(filter): Query<CompetitionListFilter>,
) -> WebResult<Json<PaginatedResponse<CompetitionResponse>>> {
    filter
        .pagination()
        .validate()
        .map_err(WebError::BadRequest)?;

    let response = services::list_competitions(db.pool(), &filter).await?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{competition_id}",
    params(
        ("competition_id" = Uuid, Path, description = "Competition ID")
    ),
    responses(
        (status = 200, description = "Competition found", body = CompetitionDetailResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(competition_id): Path<Uuid>,
) -> WebResult<Json<CompetitionDetailResponse>> {
    let competition = services::get_competition(db.pool(), competition_id).await?;

    Ok(Json(competition))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{competition_id}/ranking",
    params(
        ("competition_id" = Uuid, Path, description = "Competition ID"),
        RankingQuery
    ),
    responses(
        (status = 200, description = "Ranking computed from current scores or engagement", body = CompetitionRanking),
        (status = 404, description = "Competition not found")
    ),
    tag = "rankings"
)]
pub async fn get_ranking(
    State(db): State<Database>,
    State(settings): State<EngineSettings>,
    Path(competition_id): Path<Uuid>,
    Query(query): Query<RankingQuery>,
) -> WebResult<Json<CompetitionRanking>> {
    let ranking =
        services::get_ranking(db.pool(), competition_id, query.mode, settings.weighting).await?;

    Ok(Json(ranking))
}
