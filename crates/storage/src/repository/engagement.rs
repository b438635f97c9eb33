use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::EngagementCounters;
use crate::services::engagement::EngagementStore;

#[derive(FromRow)]
struct CounterRow {
    likes: i64,
    views: i64,
}

#[derive(FromRow)]
struct RemovedRow {
    found: bool,
    removed: bool,
}

#[derive(FromRow)]
struct LikedRow {
    likes: i64,
    team_id: Option<Uuid>,
}

pub struct EngagementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EngagementRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementStore for EngagementRepository<'_> {
    async fn has_liked_on(
        &self,
        user_id: Uuid,
        entrant_id: Uuid,
        day: NaiveDate,
    ) -> Result<bool> {
        let liked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM entrant_likes
                WHERE user_id = $1 AND entrant_id = $2 AND liked_on = $3
            )
            "#,
        )
        .bind(user_id)
        .bind(entrant_id)
        .bind(day)
        .fetch_one(self.pool)
        .await?;

        Ok(liked)
    }

    /// The event row and both counters move together; the primary key on
    /// `entrant_likes` settles concurrent duplicates.
    async fn insert_like(
        &self,
        user_id: Uuid,
        entrant_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO entrant_likes (user_id, entrant_id, liked_on)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, entrant_id, liked_on) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(entrant_id)
        .bind(day)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let liked = sqlx::query_as::<_, LikedRow>(
            r#"
            UPDATE entrants
            SET likes = likes + 1
            WHERE entrant_id = $1
            RETURNING likes, team_id
            "#,
        )
        .bind(entrant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if let Some(team_id) = liked.team_id {
            sqlx::query("UPDATE teams SET total_likes = total_likes + 1 WHERE team_id = $1")
                .bind(team_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Some(liked.likes))
    }

    async fn add_favorite(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO entrant_favorites (user_id, entrant_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, entrant_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(entrant_id)
        .execute(self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    async fn remove_favorite(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool> {
        let row = sqlx::query_as::<_, RemovedRow>(
            r#"
            WITH deleted AS (
                DELETE FROM entrant_favorites
                WHERE user_id = $1 AND entrant_id = $2
                RETURNING 1
            )
            SELECT EXISTS (SELECT 1 FROM entrants WHERE entrant_id = $2) AS found,
                   EXISTS (SELECT 1 FROM deleted) AS removed
            "#,
        )
        .bind(user_id)
        .bind(entrant_id)
        .fetch_one(self.pool)
        .await?;

        if !row.found {
            return Err(StorageError::NotFound);
        }

        Ok(row.removed)
    }

    async fn is_favorited(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool> {
        let favorited = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM entrant_favorites
                WHERE user_id = $1 AND entrant_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(entrant_id)
        .fetch_one(self.pool)
        .await?;

        Ok(favorited)
    }

    async fn increment_views(&self, entrant_id: Uuid) -> Result<i64> {
        let views = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE entrants
            SET views = views + 1
            WHERE entrant_id = $1
            RETURNING views
            "#,
        )
        .bind(entrant_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(views)
    }

    async fn counters(&self, entrant_id: Uuid) -> Result<EngagementCounters> {
        let row = sqlx::query_as::<_, CounterRow>(
            "SELECT likes, views FROM entrants WHERE entrant_id = $1",
        )
        .bind(entrant_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(EngagementCounters {
            likes: row.likes,
            views: row.views,
        })
    }
}
