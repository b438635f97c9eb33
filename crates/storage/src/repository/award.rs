use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::decode;
use crate::error::{Result, StorageError};
use crate::models::Award;

#[derive(FromRow)]
struct AwardRow {
    award_id: Uuid,
    competition_id: Uuid,
    competition_type: String,
    target_kind: String,
    target_id: Uuid,
    award_type: String,
    rank: i16,
    category: String,
    score: Option<Decimal>,
    year: i32,
    month: i32,
    app_name: String,
    creator: String,
    award_name: String,
}

impl TryFrom<AwardRow> for Award {
    type Error = StorageError;

    fn try_from(row: AwardRow) -> Result<Self> {
        Ok(Self {
            award_id: row.award_id,
            competition_id: row.competition_id,
            competition_type: decode("awards.competition_type", &row.competition_type)?,
            target_kind: decode("awards.target_kind", &row.target_kind)?,
            target_id: row.target_id,
            award_type: decode("awards.award_type", &row.award_type)?,
            rank: row.rank,
            category: decode("awards.category", &row.category)?,
            score: row.score,
            year: row.year,
            month: row.month,
            app_name: row.app_name,
            creator: row.creator,
            award_name: row.award_name,
        })
    }
}

pub struct AwardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AwardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All awards published for a year, ordered by id so that ties in the
    /// query engine's stable sort come out the same on every call.
    pub async fn list_by_year(&self, year: i32) -> Result<Vec<Award>> {
        sqlx::query_as::<_, AwardRow>(
            r#"
            SELECT award_id, competition_id, competition_type, target_kind, target_id,
                   award_type, rank, category, score, year, month, app_name, creator, award_name
            FROM awards
            WHERE year = $1
            ORDER BY award_id
            "#,
        )
        .bind(year)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(Award::try_from)
        .collect()
    }
}
