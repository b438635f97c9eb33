use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::PaginationParams;
use crate::models::{Competition, CompetitionFormat, CompetitionStatus, Judge};

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct CompetitionListFilter {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Only competitions held in this year
    pub year: Option<i32>,
}

impl CompetitionListFilter {
    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// Response containing competition details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub competition_id: Uuid,
    pub name: String,
    pub year: i32,
    pub month: i32,
    pub format: CompetitionFormat,
    pub status: CompetitionStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Competition> for CompetitionResponse {
    fn from(comp: Competition) -> Self {
        Self {
            competition_id: comp.competition_id,
            name: comp.name,
            year: comp.year,
            month: comp.month,
            format: comp.format,
            status: comp.status,
            start_date: comp.start_date,
            end_date: comp.end_date,
        }
    }
}

/// Competition with its judging panel and entry counts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitionDetailResponse {
    pub competition: CompetitionResponse,
    pub judges: Vec<Judge>,
    pub team_count: usize,
    pub entrant_count: usize,
}
