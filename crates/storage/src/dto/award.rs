use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Result, StorageError};
use crate::models::{Award, AwardCategory, AwardTargetKind, AwardType, CompetitionFormat};
use crate::services::awards::{AwardFilter, CategoryFilter, MonthGroup};

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct AwardQueryParams {
    /// Required.
    pub year: Option<i32>,
    /// individual, team, proposal or mixed
    pub competition_type: Option<String>,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: Option<i32>,
    /// `ranking`, `popular`, or an award category
    pub category: Option<String>,
    /// Case-insensitive search over app name, creator and award name
    pub query: Option<String>,
}

impl AwardQueryParams {
    pub fn into_filter(self) -> Result<(i32, AwardFilter)> {
        let year = self
            .year
            .ok_or_else(|| StorageError::Validation("year is required".to_string()))?;

        let competition_type = match self.competition_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<CompetitionFormat>()?),
        };

        let filter = AwardFilter {
            competition_type,
            month: self.month,
            category: self.category.as_deref().and_then(CategoryFilter::parse),
            query: None,
        }
        .with_query(self.query.as_deref().unwrap_or_default());

        Ok((year, filter))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AwardResponse {
    pub award_id: Uuid,
    pub competition_id: Uuid,
    pub competition_type: CompetitionFormat,
    pub target_kind: AwardTargetKind,
    pub target_id: Uuid,
    pub award_type: AwardType,
    pub rank: i16,
    pub category: AwardCategory,
    pub score: Option<f64>,
    pub month: i32,
    pub app_name: String,
    pub creator: String,
    pub award_name: String,
}

impl From<Award> for AwardResponse {
    fn from(award: Award) -> Self {
        Self {
            award_id: award.award_id,
            competition_id: award.competition_id,
            competition_type: award.competition_type,
            target_kind: award.target_kind,
            target_id: award.target_id,
            award_type: award.award_type,
            rank: award.rank,
            category: award.category,
            score: award.score.map(decimal_to_f64),
            month: award.month,
            app_name: award.app_name,
            creator: award.creator,
            award_name: award.award_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AwardMonthGroup {
    pub month: i32,
    pub awards: Vec<AwardResponse>,
}

impl From<MonthGroup> for AwardMonthGroup {
    fn from(group: MonthGroup) -> Self {
        Self {
            month: group.month,
            awards: group.awards.into_iter().map(AwardResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AwardCatalogueResponse {
    pub year: i32,
    pub total: usize,
    pub groups: Vec<AwardMonthGroup>,
}

impl AwardCatalogueResponse {
    pub fn new(year: i32, groups: Vec<MonthGroup>) -> Self {
        let total = groups.iter().map(|g| g.awards.len()).sum();
        Self {
            year,
            total,
            groups: groups.into_iter().map(AwardMonthGroup::from).collect(),
        }
    }
}

fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_string().parse().unwrap_or(0.0)
}
