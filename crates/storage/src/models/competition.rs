use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

text_enum! {
    /// How entries are submitted and which popularity formula applies.
    pub enum CompetitionFormat {
        Individual => "individual",
        Team => "team",
        Proposal => "proposal",
        Mixed => "mixed",
    }
}

text_enum! {
    pub enum CompetitionStatus {
        Upcoming => "upcoming",
        Active => "active",
        Judging => "judging",
        Completed => "completed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Competition {
    pub competition_id: Uuid,
    pub name: String,
    pub year: i32,
    pub month: i32,
    pub format: CompetitionFormat,
    pub status: CompetitionStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl Competition {
    /// Team-format competitions are ranked by the team popularity index;
    /// everything else by per-entrant likes.
    pub fn uses_team_popularity(&self) -> bool {
        self.format == CompetitionFormat::Team
    }
}
