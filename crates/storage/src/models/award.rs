use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::competition::CompetitionFormat;

text_enum! {
    pub enum AwardType {
        Gold => "gold",
        Silver => "silver",
        Bronze => "bronze",
        Popular => "popular",
        Innovation => "innovation",
        Technical => "technical",
        Custom => "custom",
    }
}

text_enum! {
    pub enum AwardCategory {
        Productivity => "productivity",
        Creative => "creative",
        Analytics => "analytics",
        Education => "education",
        Service => "service",
        Other => "other",
    }
}

text_enum! {
    pub enum AwardTargetKind {
        App => "app",
        Team => "team",
        Proposal => "proposal",
    }
}

/// Rank value for awards that are not placements (popular, custom, ...).
pub const UNRANKED: i16 = 0;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Award {
    pub award_id: Uuid,
    pub competition_id: Uuid,
    pub competition_type: CompetitionFormat,
    pub target_kind: AwardTargetKind,
    pub target_id: Uuid,
    pub award_type: AwardType,
    /// 1..=3 for placements, [`UNRANKED`] otherwise.
    pub rank: i16,
    pub category: AwardCategory,
    pub score: Option<Decimal>,
    pub year: i32,
    pub month: i32,
    pub app_name: String,
    pub creator: String,
    pub award_name: String,
}

impl Award {
    pub fn is_placement(&self) -> bool {
        (1..=3).contains(&self.rank)
    }
}
