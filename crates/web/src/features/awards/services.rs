use sqlx::PgPool;
use storage::{
    dto::award::AwardCatalogueResponse, error::Result, repository::award::AwardRepository,
    services::awards::{self, AwardFilter},
};

/// Awards for one year, filtered, then grouped by month newest first
pub async fn query_awards(
    pool: &PgPool,
    year: i32,
    filter: &AwardFilter,
) -> Result<AwardCatalogueResponse> {
    let base = AwardRepository::new(pool).list_by_year(year).await?;
    let groups = awards::query_awards(base, filter);

    Ok(AwardCatalogueResponse::new(year, groups))
}
