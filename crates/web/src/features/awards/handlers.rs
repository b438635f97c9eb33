use axum::{
    Json,
    extract::{Query, State},
};
use storage::{
    Database,
    dto::award::{AwardCatalogueResponse, AwardQueryParams},
};
use validator::Validate;

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/awards",
    params(AwardQueryParams),
    responses(
        (status = 200, description = "Awards grouped by month, newest month first", body = AwardCatalogueResponse),
        (status = 400, description = "Missing year or invalid filter")
    ),
    tag = "awards"
)]
pub async fn list_awards(
    State(db): State<Database>,
    Query(params): Query<AwardQueryParams>,
) -> WebResult<Json<AwardCatalogueResponse>> {
    params.validate()?;
    let (year, filter) = params.into_filter()?;

    let catalogue = services::query_awards(db.pool(), year, &filter).await?;

    Ok(Json(catalogue))
}
