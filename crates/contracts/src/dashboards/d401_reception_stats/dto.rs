use serde::{Deserialize, Serialize};

/// Optional date range of the statistics cards (`YYYY-MM-DD`, inclusive)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceptionStatsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// Totals shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceptionStats {
    pub total_receptions: u64,
    pub total_vehicles: i64,
    pub total_quantity: f64,
    /// Distinct company names, sorted
    pub companies: Vec<String>,
    /// Distinct water types, sorted
    pub water_types: Vec<String>,
}
