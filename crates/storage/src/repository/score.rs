use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{CriterionScores, JudgeScore};
use crate::services::scoring::{ScoreStore, ScoreSubmission};

#[derive(FromRow)]
struct ScoreRow {
    judge_id: Uuid,
    entrant_id: Uuid,
    innovation: i16,
    technical: i16,
    usability: i16,
    presentation: i16,
    impact: i16,
    comment: String,
    submitted_at: NaiveDateTime,
    first_submitted_at: NaiveDateTime,
}

impl TryFrom<ScoreRow> for JudgeScore {
    type Error = StorageError;

    fn try_from(row: ScoreRow) -> Result<Self> {
        let criteria = CriterionScores::new(
            row.innovation,
            row.technical,
            row.usability,
            row.presentation,
            row.impact,
        )
        .map_err(|e| StorageError::InvalidData(format!("judge_scores: {e}")))?;

        Ok(Self {
            judge_id: row.judge_id,
            entrant_id: row.entrant_id,
            criteria,
            comment: row.comment,
            submitted_at: row.submitted_at,
            first_submitted_at: row.first_submitted_at,
        })
    }
}

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every score row for entrants of one competition.
    pub async fn scores_for_competition(&self, competition_id: Uuid) -> Result<Vec<JudgeScore>> {
        sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT s.judge_id, s.entrant_id, s.innovation, s.technical, s.usability,
                   s.presentation, s.impact, s.comment, s.submitted_at, s.first_submitted_at
            FROM judge_scores s
            INNER JOIN entrants e ON e.entrant_id = s.entrant_id
            WHERE e.competition_id = $1
            ORDER BY s.entrant_id, s.judge_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(JudgeScore::try_from)
        .collect()
    }
}

#[async_trait]
impl ScoreStore for ScoreRepository<'_> {
    async fn upsert_score(&self, submission: &ScoreSubmission) -> Result<JudgeScore> {
        let criteria = submission.criteria();
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            INSERT INTO judge_scores (
                judge_id, entrant_id, innovation, technical, usability,
                presentation, impact, comment, submitted_at, first_submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            ON CONFLICT (judge_id, entrant_id) DO UPDATE SET
                innovation = EXCLUDED.innovation,
                technical = EXCLUDED.technical,
                usability = EXCLUDED.usability,
                presentation = EXCLUDED.presentation,
                impact = EXCLUDED.impact,
                comment = EXCLUDED.comment,
                submitted_at = EXCLUDED.submitted_at
            RETURNING judge_id, entrant_id, innovation, technical, usability,
                      presentation, impact, comment, submitted_at, first_submitted_at
            "#,
        )
        .bind(submission.judge_id())
        .bind(submission.entrant_id())
        .bind(criteria.innovation)
        .bind(criteria.technical)
        .bind(criteria.usability)
        .bind(criteria.presentation)
        .bind(criteria.impact)
        .bind(submission.comment())
        .fetch_one(self.pool)
        .await?;

        JudgeScore::try_from(row)
    }

    async fn scores_for_entrant(&self, entrant_id: Uuid) -> Result<Vec<JudgeScore>> {
        sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT judge_id, entrant_id, innovation, technical, usability,
                   presentation, impact, comment, submitted_at, first_submitted_at
            FROM judge_scores
            WHERE entrant_id = $1
            ORDER BY judge_id
            "#,
        )
        .bind(entrant_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(JudgeScore::try_from)
        .collect()
    }
}
