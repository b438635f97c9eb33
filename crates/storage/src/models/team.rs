use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub leader_id: Uuid,
    pub department: String,
    /// Members in roster order, leader included.
    pub members: Vec<Uuid>,
    /// Entrants (apps) submitted by this team, in submission order.
    pub app_ids: Vec<Uuid>,
    /// Denormalized sum of likes over `app_ids`, maintained by the ledger.
    pub total_likes: i64,
}
