use sqlx::PgPool;
use storage::{
    dto::{
        competition::{CompetitionDetailResponse, CompetitionListFilter, CompetitionResponse},
        common::PaginatedResponse,
        ranking::CompetitionRanking,
    },
    error::Result,
    models::{RankingMode, ScoreWeighting},
    repository::{directory::DirectoryRepository, score::ScoreRepository},
    services::ranking,
};
use uuid::Uuid;

/// List competitions, newest first
pub async fn list_competitions(
    pool: &PgPool,
    filter: &CompetitionListFilter,
) -> Result<PaginatedResponse<CompetitionResponse>> {
    let pagination = filter.pagination();
    let repo = DirectoryRepository::new(pool);
    let (competitions, total_items) = repo.list_competitions(filter.year, pagination).await?;

    let data = competitions
        .into_iter()
        .map(CompetitionResponse::from)
        .collect();

    Ok(PaginatedResponse::new(data, pagination, total_items))
}

/// Competition with its judging panel
pub async fn get_competition(
    pool: &PgPool,
    competition_id: Uuid,
) -> Result<CompetitionDetailResponse> {
    let directory = DirectoryRepository::new(pool)
        .load_competition(competition_id)
        .await?;

    Ok(CompetitionDetailResponse {
        competition: CompetitionResponse::from(directory.competition().clone()),
        judges: directory.judges().cloned().collect(),
        team_count: directory.teams().count(),
        entrant_count: directory.entrants().count(),
    })
}

/// Ranking computed from the current scores and counters
pub async fn get_ranking(
    pool: &PgPool,
    competition_id: Uuid,
    mode: RankingMode,
    weighting: ScoreWeighting,
) -> Result<CompetitionRanking> {
    let directory = DirectoryRepository::new(pool)
        .load_competition(competition_id)
        .await?;

    let scores = match mode {
        RankingMode::Score => {
            ScoreRepository::new(pool)
                .scores_for_competition(competition_id)
                .await?
        }
        RankingMode::Popularity => Vec::new(),
    };

    Ok(ranking::get_ranking(&directory, &scores, mode, weighting))
}
