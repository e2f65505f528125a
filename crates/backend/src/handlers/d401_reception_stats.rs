use axum::{extract::Query, Json};
use contracts::dashboards::d401_reception_stats::dto::{ReceptionStats, ReceptionStatsQuery};

use crate::dashboards::d401_reception_stats::service;
use crate::shared::api_error::ApiError;

/// GET /api/v1/vehicle-receptions/stats/summary
pub async fn get_stats(Query(query): Query<ReceptionStatsQuery>) -> Result<Json<ReceptionStats>, ApiError> {
    Ok(Json(service::get_stats(&query).await?))
}
