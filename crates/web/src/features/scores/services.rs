use sqlx::PgPool;
use storage::{
    dto::score::{ScoreSummaryResponse, SubmitScoreRequest},
    error::Result,
    models::{Caller, ScoreWeighting},
    repository::{directory::DirectoryRepository, score::ScoreRepository},
    services::{
        aggregation,
        scoring::{self, ScoreStore, ScoreSubmission},
    },
};
use uuid::Uuid;

/// Current score rows and aggregate for one entrant. An unscored entrant
/// yields an empty summary.
pub async fn get_score_summary(
    pool: &PgPool,
    entrant_id: Uuid,
    weighting: ScoreWeighting,
) -> Result<ScoreSummaryResponse> {
    DirectoryRepository::new(pool).find_entrant(entrant_id).await?;
    summarize(&ScoreRepository::new(pool), entrant_id, weighting).await
}

/// Records a judge's score. Only judges assigned to the entrant's
/// competition may score it.
pub async fn submit_score(
    pool: &PgPool,
    caller: &Caller,
    entrant_id: Uuid,
    request: &SubmitScoreRequest,
    weighting: ScoreWeighting,
) -> Result<ScoreSummaryResponse> {
    scoring::require_judge(caller)?;

    let directory = DirectoryRepository::new(pool);
    let entrant = directory.find_entrant(entrant_id).await?;
    let panel = directory.load_competition(entrant.competition_id).await?;
    let judge_id = scoring::authorize_judge(&panel, caller, entrant_id).inspect_err(|e| {
        tracing::warn!(%entrant_id, error = %e, "Score submission refused");
    })?;

    let submission =
        ScoreSubmission::new(judge_id, entrant_id, request.criteria()?, &request.comment)?;
    let store = ScoreRepository::new(pool);
    let saved = scoring::submit_score(&store, submission).await?;

    tracing::info!(
        %judge_id,
        %entrant_id,
        replaced = saved.submitted_at != saved.first_submitted_at,
        "Score submitted"
    );

    summarize(&store, entrant_id, weighting).await
}

async fn summarize<S>(
    store: &S,
    entrant_id: Uuid,
    weighting: ScoreWeighting,
) -> Result<ScoreSummaryResponse>
where
    S: ScoreStore + ?Sized,
{
    let scores = store.scores_for_entrant(entrant_id).await?;
    let aggregate = aggregation::aggregate_entrant(entrant_id, &scores, weighting);
    Ok(ScoreSummaryResponse::new(entrant_id, weighting, aggregate, scores))
}
