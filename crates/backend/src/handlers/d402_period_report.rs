use axum::{extract::Query, response::Response, Json};
use contracts::dashboards::d402_period_report::dto::{ReportRequest, ReportSummary, ReportSummaryQuery};

use super::csv_attachment;
use crate::dashboards::d402_period_report::service;
use crate::shared::api_error::ApiError;

/// GET /api/v1/reports/summary
pub async fn get_summary(Query(query): Query<ReportSummaryQuery>) -> Result<Json<ReportSummary>, ApiError> {
    Ok(Json(service::get_summary(&query).await?))
}

/// POST /api/v1/reports/generate
pub async fn generate(Json(request): Json<ReportRequest>) -> Result<Response, ApiError> {
    let (filename, content) = service::generate_report(&request).await?;
    Ok(csv_attachment(&filename, content))
}
