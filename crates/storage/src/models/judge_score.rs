use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};

pub const MIN_CRITERION_SCORE: i16 = 1;
pub const MAX_CRITERION_SCORE: i16 = 10;

text_enum! {
    /// The five fixed judging dimensions.
    pub enum Criterion {
        Innovation => "innovation",
        Technical => "technical",
        Usability => "usability",
        Presentation => "presentation",
        Impact => "impact",
    }
}

impl Criterion {
    /// Weight in percent under [`ScoreWeighting::Weighted`]. Sums to 100.
    pub fn weight_percent(&self) -> i64 {
        match self {
            Criterion::Innovation => 25,
            Criterion::Technical => 25,
            Criterion::Usability => 20,
            Criterion::Presentation => 15,
            Criterion::Impact => 15,
        }
    }
}

text_enum! {
    /// How a single judge's five criteria fold into that judge's overall score.
    pub enum ScoreWeighting {
        Unweighted => "unweighted",
        Weighted => "weighted",
    }
}

impl Default for ScoreWeighting {
    fn default() -> Self {
        ScoreWeighting::Unweighted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CriterionScores {
    pub innovation: i16,
    pub technical: i16,
    pub usability: i16,
    pub presentation: i16,
    pub impact: i16,
}

impl CriterionScores {
    /// Builds a score set, rejecting anything outside 1..=10.
    pub fn new(
        innovation: i16,
        technical: i16,
        usability: i16,
        presentation: i16,
        impact: i16,
    ) -> Result<Self> {
        let scores = Self {
            innovation,
            technical,
            usability,
            presentation,
            impact,
        };
        scores.check_range()?;
        Ok(scores)
    }

    pub fn uniform(value: i16) -> Result<Self> {
        Self::new(value, value, value, value, value)
    }

    pub fn get(&self, criterion: Criterion) -> i16 {
        match criterion {
            Criterion::Innovation => self.innovation,
            Criterion::Technical => self.technical,
            Criterion::Usability => self.usability,
            Criterion::Presentation => self.presentation,
            Criterion::Impact => self.impact,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, i16)> + '_ {
        Criterion::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn check_range(&self) -> Result<()> {
        for (criterion, value) in self.iter() {
            if !(MIN_CRITERION_SCORE..=MAX_CRITERION_SCORE).contains(&value) {
                return Err(StorageError::Validation(format!(
                    "{criterion} must be between {MIN_CRITERION_SCORE} and {MAX_CRITERION_SCORE}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Sum of the five criteria, scaled so that dividing by
    /// [`Self::points_scale`] yields the judge's overall score.
    pub fn points(&self, weighting: ScoreWeighting) -> i64 {
        match weighting {
            ScoreWeighting::Unweighted => self.iter().map(|(_, v)| i64::from(v)).sum(),
            ScoreWeighting::Weighted => self
                .iter()
                .map(|(c, v)| c.weight_percent() * i64::from(v))
                .sum(),
        }
    }

    pub fn points_scale(weighting: ScoreWeighting) -> i64 {
        match weighting {
            ScoreWeighting::Unweighted => Criterion::ALL.len() as i64,
            ScoreWeighting::Weighted => 100,
        }
    }

    pub fn overall(&self, weighting: ScoreWeighting) -> f64 {
        self.points(weighting) as f64 / Self::points_scale(weighting) as f64
    }
}

/// One judge's verdict on one entrant. At most one row exists per
/// (judge_id, entrant_id); resubmission overwrites it in place.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeScore {
    pub judge_id: Uuid,
    pub entrant_id: Uuid,
    pub criteria: CriterionScores,
    pub comment: String,
    pub submitted_at: NaiveDateTime,
    /// When this judge first scored the entrant; survives resubmission.
    pub first_submitted_at: NaiveDateTime,
}
