use axum::{extract::Query, response::Response, Json};
use contracts::dashboards::d403_financial_report::dto::{
    CompanyRatesResponse, FinancialReportRequest, FinancialReportSummary,
};

use super::csv_attachment;
use crate::dashboards::d403_financial_report::{rates, service};
use crate::shared::api_error::ApiError;

/// GET /api/v1/reports/financial/summary
pub async fn get_summary(
    Query(request): Query<FinancialReportRequest>,
) -> Result<Json<FinancialReportSummary>, ApiError> {
    Ok(Json(service::get_summary(&request).await?))
}

/// POST /api/v1/reports/financial/generate
pub async fn generate(Json(request): Json<FinancialReportRequest>) -> Result<Response, ApiError> {
    let (filename, content) = service::generate_report(&request).await?;
    Ok(csv_attachment(&filename, content))
}

/// GET /api/v1/reports/company-rates
pub async fn company_rates() -> Json<CompanyRatesResponse> {
    Json(rates::all_rates())
}
