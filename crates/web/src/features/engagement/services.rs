use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::engagement::{EngagementResponse, FavoriteResponse, LikeResponse, ViewResponse},
    error::{Result, StorageError},
    models::Caller,
    repository::engagement::EngagementRepository,
    services::engagement,
};
use uuid::Uuid;

pub async fn like(
    pool: &PgPool,
    caller: &Caller,
    entrant_id: Uuid,
    today: NaiveDate,
) -> Result<LikeResponse> {
    let store = EngagementRepository::new(pool);
    match engagement::like(&store, caller, entrant_id, today).await {
        Ok(response) => {
            tracing::info!(%entrant_id, likes = response.likes, "Like recorded");
            Ok(response)
        }
        Err(StorageError::AlreadyLiked) => {
            tracing::debug!(%entrant_id, %today, "Like rejected, already liked today");
            Err(StorageError::AlreadyLiked)
        }
        Err(e) => Err(e),
    }
}

pub async fn toggle_favorite(
    pool: &PgPool,
    caller: &Caller,
    entrant_id: Uuid,
) -> Result<FavoriteResponse> {
    let response =
        engagement::toggle_favorite(&EngagementRepository::new(pool), caller, entrant_id).await?;
    tracing::info!(%entrant_id, is_favorited = response.is_favorited, "Favorite toggled");
    Ok(response)
}

pub async fn add_favorite(
    pool: &PgPool,
    caller: &Caller,
    entrant_id: Uuid,
) -> Result<FavoriteResponse> {
    engagement::add_favorite(&EngagementRepository::new(pool), caller, entrant_id).await
}

pub async fn remove_favorite(
    pool: &PgPool,
    caller: &Caller,
    entrant_id: Uuid,
) -> Result<FavoriteResponse> {
    engagement::remove_favorite(&EngagementRepository::new(pool), caller, entrant_id).await
}

pub async fn record_view(pool: &PgPool, entrant_id: Uuid) -> Result<ViewResponse> {
    engagement::record_view(&EngagementRepository::new(pool), entrant_id).await
}

pub async fn get_engagement(
    pool: &PgPool,
    caller: &Caller,
    entrant_id: Uuid,
    today: NaiveDate,
) -> Result<EngagementResponse> {
    engagement::engagement_summary(&EngagementRepository::new(pool), caller, entrant_id, today)
        .await
}
