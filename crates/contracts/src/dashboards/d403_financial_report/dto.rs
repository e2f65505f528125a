use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EGP")]
    Egp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Egp => "EGP",
        }
    }
}

/// Query of the financial summary and body of the financial export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialReportRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancialSummary {
    pub company_name: String,
    pub total_volume_m3: f64,
    /// Effective rate: `total_cost / total_volume_m3`
    pub rate_per_m3: f64,
    pub currency: Currency,
    pub total_cost: f64,
    pub reception_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReportSummary {
    pub period_start: String,
    pub period_end: String,
    /// Sorted by `total_cost`, highest first
    pub companies: Vec<CompanyFinancialSummary>,
    pub total_volume_m3: f64,
    /// Plain sum over all companies regardless of currency
    pub total_cost: f64,
    /// Currency code ("USD", "EGP") -> cost
    pub totals_by_currency: BTreeMap<String, f64>,
    pub generated_at: NaiveDateTime,
}

/// One row of the rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRate {
    pub company_name: String,
    /// `None` when the rate applies to every water type of the company
    pub water_type: Option<String>,
    pub rate: f64,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRatesResponse {
    pub rates: Vec<CompanyRate>,
    pub default_rate: f64,
    pub default_currency: Currency,
}
