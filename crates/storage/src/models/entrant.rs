use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};

text_enum! {
    pub enum EntrantKind {
        Individual => "individual",
        Team => "team",
        Proposal => "proposal",
    }
}

/// Who submitted the entrant. Team entrants are always owned by a team,
/// individual entrants by their creator; proposals may be either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntrantOwner {
    Creator { creator_id: Uuid },
    Team { team_id: Uuid },
}

impl EntrantOwner {
    /// Builds the owner from the two nullable owner columns, enforcing the
    /// pairing between kind and owner.
    pub fn resolve(
        kind: EntrantKind,
        creator_id: Option<Uuid>,
        team_id: Option<Uuid>,
    ) -> Result<Self> {
        match (kind, creator_id, team_id) {
            (EntrantKind::Team, _, Some(team_id)) => Ok(EntrantOwner::Team { team_id }),
            (EntrantKind::Individual, Some(creator_id), None) => {
                Ok(EntrantOwner::Creator { creator_id })
            }
            (EntrantKind::Proposal, _, Some(team_id)) => Ok(EntrantOwner::Team { team_id }),
            (EntrantKind::Proposal, Some(creator_id), None) => {
                Ok(EntrantOwner::Creator { creator_id })
            }
            (kind, _, _) => Err(StorageError::InvalidData(format!(
                "{kind} entrant has no valid owner"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EngagementCounters {
    pub likes: i64,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Entrant {
    pub entrant_id: Uuid,
    pub competition_id: Uuid,
    pub kind: EntrantKind,
    pub title: String,
    pub owner: EntrantOwner,
    pub owner_name: String,
    pub department: String,
    pub counters: EngagementCounters,
    /// Externally sourced rating, stored as-is.
    pub rating: Option<f64>,
    pub submitted_at: NaiveDateTime,
}

/// The slice of an entrant the ranking engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrantStats {
    pub entrant_id: Uuid,
    pub likes: i64,
    pub views: i64,
}

impl Entrant {
    pub fn team_id(&self) -> Option<Uuid> {
        match self.owner {
            EntrantOwner::Team { team_id } => Some(team_id),
            EntrantOwner::Creator { .. } => None,
        }
    }

    pub fn stats(&self) -> EntrantStats {
        EntrantStats {
            entrant_id: self.entrant_id,
            likes: self.counters.likes,
            views: self.counters.views,
        }
    }
}
