use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Criterion, CriterionScores, JudgeScore, ScoreWeighting};

/// Mean of each criterion across the judges who scored an entrant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct CriterionBreakdown {
    pub innovation: f64,
    pub technical: f64,
    pub usability: f64,
    pub presentation: f64,
    pub impact: f64,
}

impl CriterionBreakdown {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Innovation => self.innovation,
            Criterion::Technical => self.technical,
            Criterion::Usability => self.usability,
            Criterion::Presentation => self.presentation,
            Criterion::Impact => self.impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AggregateScore {
    pub entrant_id: Uuid,
    /// Mean over judges of each judge's overall score.
    pub aggregate: f64,
    pub breakdown: CriterionBreakdown,
    pub judge_count: usize,
    pub first_submitted_at: NaiveDateTime,
    pub last_submitted_at: NaiveDateTime,
}

/// A judge's overall score for one entrant: the mean of the five criteria
/// (or their weighted mean under [`ScoreWeighting::Weighted`]).
pub fn overall_score_for_judge(score: &JudgeScore, weighting: ScoreWeighting) -> f64 {
    score.criteria.overall(weighting)
}

/// Integer sums per entrant; division happens once at the end so the result
/// does not depend on the order rows were read in.
#[derive(Default)]
struct Accumulator {
    points: i64,
    per_criterion: [i64; 5],
    judges: usize,
    first: Option<NaiveDateTime>,
    last: Option<NaiveDateTime>,
}

impl Accumulator {
    fn add(&mut self, score: &JudgeScore, weighting: ScoreWeighting) {
        self.points += score.criteria.points(weighting);
        for (slot, (_, value)) in self.per_criterion.iter_mut().zip(score.criteria.iter()) {
            *slot += i64::from(value);
        }
        self.judges += 1;
        self.first = Some(match self.first {
            Some(first) => first.min(score.first_submitted_at),
            None => score.first_submitted_at,
        });
        self.last = Some(match self.last {
            Some(last) => last.max(score.submitted_at),
            None => score.submitted_at,
        });
    }

    fn finish(self, entrant_id: Uuid, weighting: ScoreWeighting) -> Option<AggregateScore> {
        let (first, last) = (self.first?, self.last?);

        let judges = self.judges as f64;
        let scale = CriterionScores::points_scale(weighting) as f64;
        let mean = |sum: i64| sum as f64 / judges;

        Some(AggregateScore {
            entrant_id,
            aggregate: self.points as f64 / (scale * judges),
            breakdown: CriterionBreakdown {
                innovation: mean(self.per_criterion[0]),
                technical: mean(self.per_criterion[1]),
                usability: mean(self.per_criterion[2]),
                presentation: mean(self.per_criterion[3]),
                impact: mean(self.per_criterion[4]),
            },
            judge_count: self.judges,
            first_submitted_at: first,
            last_submitted_at: last,
        })
    }
}

/// Aggregate for a single entrant. `None` when no judge has scored it, which
/// callers must treat as "unscored", never as zero.
pub fn aggregate_entrant(
    entrant_id: Uuid,
    scores: &[JudgeScore],
    weighting: ScoreWeighting,
) -> Option<AggregateScore> {
    let mut acc = Accumulator::default();
    for score in scores.iter().filter(|s| s.entrant_id == entrant_id) {
        acc.add(score, weighting);
    }
    acc.finish(entrant_id, weighting)
}

/// Aggregates for every entrant that appears in `scores`.
pub fn aggregate_all(
    scores: &[JudgeScore],
    weighting: ScoreWeighting,
) -> BTreeMap<Uuid, AggregateScore> {
    let mut accumulators: BTreeMap<Uuid, Accumulator> = BTreeMap::new();
    for score in scores {
        accumulators
            .entry(score.entrant_id)
            .or_default()
            .add(score, weighting);
    }

    accumulators
        .into_iter()
        .filter_map(|(id, acc)| acc.finish(id, weighting).map(|agg| (id, agg)))
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use uuid::Uuid;

    use crate::directory::fixtures::timestamp;
    use crate::models::{CriterionScores, JudgeScore};

    pub fn score(judge_id: Uuid, entrant_id: Uuid, criteria: [i16; 5], minute: u32) -> JudgeScore {
        let [innovation, technical, usability, presentation, impact] = criteria;
        JudgeScore {
            judge_id,
            entrant_id,
            criteria: CriterionScores::new(innovation, technical, usability, presentation, impact)
                .unwrap(),
            comment: "solid work".to_string(),
            submitted_at: timestamp(minute),
            first_submitted_at: timestamp(minute),
        }
    }
}
