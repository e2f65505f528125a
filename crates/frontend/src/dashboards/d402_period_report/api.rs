use contracts::dashboards::d402_period_report::dto::{ReportRequest, ReportSummary, ReportSummaryQuery};

use crate::shared::http;

pub async fn get_summary(query: &ReportSummaryQuery) -> Result<ReportSummary, String> {
    http::get_json_with("/api/v1/reports/summary", query).await
}

/// CSV export; returns the server's file name (if exposed) and content
pub async fn generate(request: &ReportRequest) -> Result<(Option<String>, String), String> {
    http::post_for_file("/api/v1/reports/generate", request).await
}
