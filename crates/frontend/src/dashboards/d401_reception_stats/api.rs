use contracts::dashboards::d401_reception_stats::dto::{ReceptionStats, ReceptionStatsQuery};

use crate::shared::http;

pub async fn get_stats(query: &ReceptionStatsQuery) -> Result<ReceptionStats, String> {
    http::get_json_with("/api/v1/vehicle-receptions/stats/summary", query).await
}
