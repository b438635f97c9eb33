use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::{CriterionScores, JudgeScore, ScoreWeighting};
use crate::services::aggregation::{self, AggregateScore, CriterionBreakdown};

/// Request payload for a judge scoring an entrant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    #[validate(range(min = 1, max = 10, message = "innovation must be between 1 and 10"))]
    pub innovation: i16,
    #[validate(range(min = 1, max = 10, message = "technical must be between 1 and 10"))]
    pub technical: i16,
    #[validate(range(min = 1, max = 10, message = "usability must be between 1 and 10"))]
    pub usability: i16,
    #[validate(range(min = 1, max = 10, message = "presentation must be between 1 and 10"))]
    pub presentation: i16,
    #[validate(range(min = 1, max = 10, message = "impact must be between 1 and 10"))]
    pub impact: i16,
    #[validate(length(min = 1, max = 4000, message = "comment must be between 1 and 4000 characters"))]
    pub comment: String,
}

impl SubmitScoreRequest {
    pub fn criteria(&self) -> Result<CriterionScores> {
        CriterionScores::new(
            self.innovation,
            self.technical,
            self.usability,
            self.presentation,
            self.impact,
        )
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JudgeScoreResponse {
    pub judge_id: Uuid,
    pub entrant_id: Uuid,
    pub criteria: CriterionScores,
    /// This judge's overall score under the configured weighting.
    pub overall: f64,
    pub comment: String,
    pub submitted_at: NaiveDateTime,
}

impl JudgeScoreResponse {
    pub fn new(score: JudgeScore, weighting: ScoreWeighting) -> Self {
        Self {
            overall: aggregation::overall_score_for_judge(&score, weighting),
            judge_id: score.judge_id,
            entrant_id: score.entrant_id,
            criteria: score.criteria,
            comment: score.comment,
            submitted_at: score.submitted_at,
        }
    }
}

/// Aggregate view of an entrant's scores. `aggregate_score` and `breakdown`
/// are absent while no judge has scored the entrant.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreSummaryResponse {
    pub entrant_id: Uuid,
    pub weighting: ScoreWeighting,
    pub aggregate_score: Option<f64>,
    pub breakdown: Option<CriterionBreakdown>,
    pub judge_count: usize,
    pub last_submitted_at: Option<NaiveDateTime>,
    pub scores: Vec<JudgeScoreResponse>,
}

impl ScoreSummaryResponse {
    pub fn new(
        entrant_id: Uuid,
        weighting: ScoreWeighting,
        aggregate: Option<AggregateScore>,
        mut scores: Vec<JudgeScore>,
    ) -> Self {
        scores.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.judge_id.cmp(&b.judge_id))
        });

        Self {
            entrant_id,
            weighting,
            aggregate_score: aggregate.as_ref().map(|a| a.aggregate),
            breakdown: aggregate.as_ref().map(|a| a.breakdown),
            judge_count: aggregate.as_ref().map_or(0, |a| a.judge_count),
            last_submitted_at: aggregate.as_ref().map(|a| a.last_submitted_at),
            scores: scores
                .into_iter()
                .map(|s| JudgeScoreResponse::new(s, weighting))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(value: i16, comment: &str) -> SubmitScoreRequest {
        SubmitScoreRequest {
            innovation: value,
            technical: value,
            usability: value,
            presentation: value,
            impact: value,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(request(7, "nice demo").validate().is_ok());
        assert!(request(0, "nice demo").validate().is_err());
        assert!(request(11, "nice demo").validate().is_err());
        assert!(request(7, "").validate().is_err());
    }

    #[test]
    fn test_request_criteria_are_range_checked() {
        assert!(request(10, "x").criteria().is_ok());
        assert!(request(-1, "x").criteria().is_err());
    }

    #[test]
    fn test_summary_for_unscored_entrant() {
        let id = Uuid::new_v4();
        let summary = ScoreSummaryResponse::new(id, ScoreWeighting::Unweighted, None, vec![]);
        assert_eq!(summary.aggregate_score, None);
        assert_eq!(summary.judge_count, 0);
        assert!(summary.scores.is_empty());
    }
}
