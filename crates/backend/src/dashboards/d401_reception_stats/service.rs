use contracts::dashboards::d401_reception_stats::dto::{ReceptionStats, ReceptionStatsQuery};

use super::repository;
use crate::shared::api_error::ApiError;
use crate::shared::date_range::DateRange;

/// Dashboard cards for an optional inclusive date range
pub async fn get_stats(query: &ReceptionStatsQuery) -> Result<ReceptionStats, ApiError> {
    let range = DateRange::from_days(query.date_from.as_deref(), query.date_to.as_deref())
        .map_err(ApiError::Validation)?;

    let totals = repository::get_totals(&range).await?;
    let companies = repository::get_distinct("company_name", &range).await?;
    let water_types = repository::get_distinct("water_type", &range).await?;

    Ok(ReceptionStats {
        total_receptions: totals.total_receptions.max(0) as u64,
        total_vehicles: totals.total_vehicles,
        total_quantity: totals.total_quantity,
        companies,
        water_types,
    })
}
