use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub entrant_id: Uuid,
    /// Like counter after this like was recorded.
    pub likes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponse {
    pub entrant_id: Uuid,
    pub is_favorited: bool,
    /// False when the call found the favorite already in the requested state.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ViewResponse {
    pub entrant_id: Uuid,
    pub views: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EngagementResponse {
    pub entrant_id: Uuid,
    pub likes: i64,
    pub views: i64,
    /// Present only for authenticated callers.
    pub liked_today: Option<bool>,
    /// Present only for authenticated callers.
    pub is_favorited: Option<bool>,
}
