use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::RankingMode;
use crate::services::aggregation::CriterionBreakdown;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RankingQuery {
    /// `score` (default) or `popularity`
    #[serde(default)]
    pub mode: RankingMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankingMetric {
    Score {
        aggregate_score: f64,
        breakdown: CriterionBreakdown,
        judge_count: usize,
    },
    Popularity {
        likes: i64,
        views: i64,
    },
    TeamPopularity {
        popularity_score: i64,
        app_count: usize,
        peak_likes: i64,
        total_views: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankingEntry {
    /// 1-based position in the final order.
    pub rank: u32,
    /// Entrant id, or team id for team popularity rankings.
    pub entrant_id: Uuid,
    pub name: String,
    pub metric: RankingMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CompetitionRanking {
    pub competition_id: Uuid,
    pub mode: RankingMode,
    pub entries: Vec<RankingEntry>,
    /// Entrants without any judge score (score mode only).
    pub unscored: Vec<Uuid>,
}
