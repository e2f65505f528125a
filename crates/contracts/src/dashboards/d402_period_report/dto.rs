use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouping label of an exported report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Daily => "daily",
            ReportType::Weekly => "weekly",
            ReportType::Monthly => "monthly",
        }
    }
}

/// Query of `GET /api/v1/reports/summary`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummaryQuery {
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`, inclusive
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_type_filter: Option<String>,
}

/// Body of `POST /api/v1/reports/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub start_date: String,
    pub end_date: String,
    pub report_type: ReportType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_type_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start_date: String,
    pub end_date: String,
    /// Calendar days in the period, both ends included
    pub days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub receptions: u64,
    pub vehicles: i64,
    pub quantity: f64,
}

/// Per-day averages, rounded to 2 decimals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportAverages {
    pub vehicles_per_day: f64,
    pub quantity_per_day: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub receptions: u64,
    pub vehicles: i64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBreakdowns {
    pub companies: BTreeMap<String, BreakdownEntry>,
    pub water_types: BTreeMap<String, BreakdownEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub period: ReportPeriod,
    pub totals: ReportTotals,
    pub averages: ReportAverages,
    pub breakdowns: ReportBreakdowns,
}
