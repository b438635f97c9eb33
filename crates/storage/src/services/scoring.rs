use async_trait::async_trait;
use uuid::Uuid;

use crate::directory::CompetitionDirectory;
use crate::error::{Result, StorageError};
use crate::models::{Caller, CriterionScores, JudgeScore, Role, ScoreWeighting};
use crate::services::aggregation::{self, AggregateScore};

/// A validated score submission. Constructing one is the only way to reach
/// [`ScoreStore::upsert_score`].
#[derive(Debug, Clone)]
pub struct ScoreSubmission {
    judge_id: Uuid,
    entrant_id: Uuid,
    criteria: CriterionScores,
    comment: String,
}

impl ScoreSubmission {
    pub fn new(
        judge_id: Uuid,
        entrant_id: Uuid,
        criteria: CriterionScores,
        comment: &str,
    ) -> Result<Self> {
        criteria.check_range()?;

        let comment = comment.trim();
        if comment.is_empty() {
            return Err(StorageError::Validation(
                "comment must not be empty".to_string(),
            ));
        }

        Ok(Self {
            judge_id,
            entrant_id,
            criteria,
            comment: comment.to_string(),
        })
    }

    pub fn judge_id(&self) -> Uuid {
        self.judge_id
    }

    pub fn entrant_id(&self) -> Uuid {
        self.entrant_id
    }

    pub fn criteria(&self) -> &CriterionScores {
        &self.criteria
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Persistence seam for judge scores.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Inserts or replaces the (judge, entrant) row in one atomic step,
    /// keeping the original `first_submitted_at`.
    async fn upsert_score(&self, submission: &ScoreSubmission) -> Result<JudgeScore>;

    async fn scores_for_entrant(&self, entrant_id: Uuid) -> Result<Vec<JudgeScore>>;
}

pub fn require_judge(caller: &Caller) -> Result<Uuid> {
    let judge_id = caller.user_id()?;
    if caller.role() != Some(Role::Judge) {
        return Err(StorageError::Forbidden(
            "only judges may submit scores".to_string(),
        ));
    }
    Ok(judge_id)
}

/// Resolves the caller to a judge allowed to score `entrant_id`: the caller
/// must hold the judge role and be on the panel of the entrant's competition.
pub fn authorize_judge(
    directory: &CompetitionDirectory,
    caller: &Caller,
    entrant_id: Uuid,
) -> Result<Uuid> {
    let judge_id = require_judge(caller)?;

    directory.entrant(entrant_id)?;
    if !directory.is_judge_assigned(judge_id) {
        return Err(StorageError::Forbidden(
            "judge is not assigned to this competition".to_string(),
        ));
    }

    Ok(judge_id)
}

pub async fn submit_score<S>(store: &S, submission: ScoreSubmission) -> Result<JudgeScore>
where
    S: ScoreStore + ?Sized,
{
    store.upsert_score(&submission).await.map_err(StorageError::classify)
}

pub async fn overall_score_for_judge<S>(
    store: &S,
    entrant_id: Uuid,
    judge_id: Uuid,
    weighting: ScoreWeighting,
) -> Result<f64>
where
    S: ScoreStore + ?Sized,
{
    let scores = store.scores_for_entrant(entrant_id).await?;
    scores
        .iter()
        .find(|s| s.judge_id == judge_id)
        .map(|s| aggregation::overall_score_for_judge(s, weighting))
        .ok_or(StorageError::NotFound)
}

/// `Ok(None)` means nobody has scored the entrant yet.
pub async fn aggregate_score<S>(
    store: &S,
    entrant_id: Uuid,
    weighting: ScoreWeighting,
) -> Result<Option<AggregateScore>>
where
    S: ScoreStore + ?Sized,
{
    let scores = store.scores_for_entrant(entrant_id).await?;
    Ok(aggregation::aggregate_entrant(entrant_id, &scores, weighting))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::{Duration, NaiveDateTime};

    use super::*;
    use crate::directory::fixtures::{competition, entrant, judge, timestamp};
    use crate::models::{CompetitionFormat, EntrantOwner};

    /// Keyed by (judge, entrant) like the table's primary key.
    struct MemoryScoreStore {
        rows: Mutex<HashMap<(Uuid, Uuid), JudgeScore>>,
        clock: Mutex<NaiveDateTime>,
    }

    impl MemoryScoreStore {
        fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                clock: Mutex::new(timestamp(0)),
            }
        }

        fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn tick(&self) -> NaiveDateTime {
            let mut clock = self.clock.lock().unwrap();
            *clock += Duration::minutes(1);
            *clock
        }
    }

    #[async_trait]
    impl ScoreStore for MemoryScoreStore {
        async fn upsert_score(&self, submission: &ScoreSubmission) -> Result<JudgeScore> {
            let now = self.tick();
            let mut rows = self.rows.lock().unwrap();
            let key = (submission.judge_id(), submission.entrant_id());
            let first_submitted_at = rows.get(&key).map_or(now, |r| r.first_submitted_at);
            let row = JudgeScore {
                judge_id: submission.judge_id(),
                entrant_id: submission.entrant_id(),
                criteria: *submission.criteria(),
                comment: submission.comment().to_string(),
                submitted_at: now,
                first_submitted_at,
            };
            rows.insert(key, row.clone());
            Ok(row)
        }

        async fn scores_for_entrant(&self, entrant_id: Uuid) -> Result<Vec<JudgeScore>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.entrant_id == entrant_id)
                .cloned()
                .collect())
        }
    }

    fn uniform(value: i16) -> CriterionScores {
        CriterionScores::uniform(value).unwrap()
    }

    fn panel_directory() -> (CompetitionDirectory, Uuid, Uuid) {
        let competition = competition(CompetitionFormat::Individual);
        let panelist = judge();
        let app = entrant(
            competition.competition_id,
            EntrantOwner::Creator {
                creator_id: Uuid::new_v4(),
            },
            0,
            0,
        );
        let ids = (panelist.judge_id, app.entrant_id);
        let directory = CompetitionDirectory::new(competition, vec![panelist], vec![], vec![app]);
        (directory, ids.0, ids.1)
    }

    #[test]
    fn test_assigned_judge_is_authorized() {
        let (directory, judge_id, entrant_id) = panel_directory();
        let authorized = authorize_judge(&directory, &Caller::judge(judge_id), entrant_id).unwrap();
        assert_eq!(authorized, judge_id);
    }

    #[test]
    fn test_unassigned_judge_is_forbidden() {
        let (directory, _, entrant_id) = panel_directory();
        let result = authorize_judge(&directory, &Caller::judge(Uuid::new_v4()), entrant_id);
        assert!(matches!(result, Err(StorageError::Forbidden(_))));
    }

    #[test]
    fn test_non_judge_callers_cannot_score() {
        let (directory, judge_id, entrant_id) = panel_directory();
        assert!(matches!(
            authorize_judge(&directory, &Caller::Anonymous, entrant_id),
            Err(StorageError::AuthRequired)
        ));
        assert!(matches!(
            authorize_judge(&directory, &Caller::user(judge_id), entrant_id),
            Err(StorageError::Forbidden(_))
        ));
    }

    #[test]
    fn test_unknown_entrant_is_not_found() {
        let (directory, judge_id, _) = panel_directory();
        let result = authorize_judge(&directory, &Caller::judge(judge_id), Uuid::new_v4());
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[test]
    fn test_blank_comment_is_rejected() {
        let result = ScoreSubmission::new(Uuid::new_v4(), Uuid::new_v4(), uniform(5), "   \n");
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_out_of_range_criteria_are_rejected() {
        let criteria = CriterionScores {
            innovation: 11,
            technical: 5,
            usability: 5,
            presentation: 5,
            impact: 5,
        };
        let result = ScoreSubmission::new(Uuid::new_v4(), Uuid::new_v4(), criteria, "great");
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_comment_is_trimmed() {
        let submission =
            ScoreSubmission::new(Uuid::new_v4(), Uuid::new_v4(), uniform(5), "  clear demo ")
                .unwrap();
        assert_eq!(submission.comment(), "clear demo");
    }

    #[tokio::test]
    async fn test_resubmission_replaces_previous_row() {
        let store = MemoryScoreStore::new();
        let judge = Uuid::new_v4();
        let entrant = Uuid::new_v4();

        let first = submit_score(
            &store,
            ScoreSubmission::new(judge, entrant, uniform(4), "rough").unwrap(),
        )
        .await
        .unwrap();
        let second = submit_score(
            &store,
            ScoreSubmission::new(judge, entrant, uniform(9), "much better").unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(store.row_count(), 1);
        assert_eq!(second.first_submitted_at, first.first_submitted_at);
        assert!(second.submitted_at > first.submitted_at);

        let agg = aggregate_score(&store, entrant, ScoreWeighting::Unweighted)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(agg.aggregate, 9.0);
        assert_eq!(agg.judge_count, 1);
    }

    #[tokio::test]
    async fn test_two_judges_average_to_nine() {
        let store = MemoryScoreStore::new();
        let entrant = Uuid::new_v4();
        let judge_a = Uuid::new_v4();
        let judge_b = Uuid::new_v4();

        for (judge, value) in [(judge_a, 8), (judge_b, 10)] {
            submit_score(
                &store,
                ScoreSubmission::new(judge, entrant, uniform(value), "ok").unwrap(),
            )
            .await
            .unwrap();
        }

        let agg = aggregate_score(&store, entrant, ScoreWeighting::Unweighted)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(agg.aggregate, 9.0);

        let a = overall_score_for_judge(&store, entrant, judge_a, ScoreWeighting::Unweighted)
            .await
            .unwrap();
        assert_eq!(a, 8.0);
    }

    #[tokio::test]
    async fn test_unscored_reads_are_empty_not_errors() {
        let store = MemoryScoreStore::new();
        let entrant = Uuid::new_v4();

        let agg = aggregate_score(&store, entrant, ScoreWeighting::Unweighted)
            .await
            .unwrap();
        assert!(agg.is_none());

        let missing =
            overall_score_for_judge(&store, entrant, Uuid::new_v4(), ScoreWeighting::Unweighted)
                .await;
        assert!(matches!(missing, Err(StorageError::NotFound)));
    }
}
