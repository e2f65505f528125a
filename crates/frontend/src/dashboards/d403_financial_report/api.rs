use contracts::dashboards::d403_financial_report::dto::{
    CompanyRatesResponse, FinancialReportRequest, FinancialReportSummary,
};

use crate::shared::http;

const BASE: &str = "/api/v1/reports";

pub async fn get_summary(request: &FinancialReportRequest) -> Result<FinancialReportSummary, String> {
    http::get_json_with(&format!("{}/financial/summary", BASE), request).await
}

pub async fn generate(request: &FinancialReportRequest) -> Result<(Option<String>, String), String> {
    http::post_for_file(&format!("{}/financial/generate", BASE), request).await
}

pub async fn get_company_rates() -> Result<CompanyRatesResponse, String> {
    http::get_json(&format!("{}/company-rates", BASE)).await
}
