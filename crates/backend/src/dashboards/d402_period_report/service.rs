use chrono::NaiveDate;
use contracts::dashboards::d402_period_report::dto::{
    BreakdownEntry, ReportAverages, ReportBreakdowns, ReportPeriod, ReportRequest, ReportSummary,
    ReportSummaryQuery, ReportTotals,
};
use contracts::domain::a001_vehicle_reception::VehicleReception;

use crate::domain::a001_vehicle_reception::repository::{self, ReceptionFilter};
use crate::shared::api_error::ApiError;
use crate::shared::date_range::DateRange;
use crate::shared::format::round2;

/// Resolved period of a report request
#[derive(Debug, Clone)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub filter: ReceptionFilter,
}

impl Period {
    pub fn parse(
        start_date: &str,
        end_date: &str,
        company_filter: &Option<String>,
        water_type_filter: &Option<String>,
    ) -> Result<Self, ApiError> {
        let (start, end, range) =
            DateRange::closed(start_date, end_date).map_err(ApiError::BadRequest)?;
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Ok(Self {
            start,
            end,
            filter: ReceptionFilter {
                company: clean(company_filter),
                water_type: clean(water_type_filter),
                range,
            },
        })
    }

    /// Calendar days, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn add_to(entry: &mut BreakdownEntry, r: &VehicleReception) {
    entry.receptions += 1;
    entry.vehicles += i64::from(r.number_of_vehicles);
    entry.quantity += r.total_quantity;
}

/// Totals, per-day averages and breakdowns; an empty period yields zeros
pub fn summarize(period: &Period, receptions: &[VehicleReception]) -> ReportSummary {
    let mut totals = ReportTotals::default();
    let mut breakdowns = ReportBreakdowns::default();

    for r in receptions {
        totals.receptions += 1;
        totals.vehicles += i64::from(r.number_of_vehicles);
        totals.quantity += r.total_quantity;

        add_to(
            breakdowns.companies.entry(r.company_name.clone()).or_default(),
            r,
        );
        add_to(
            breakdowns.water_types.entry(r.water_type.clone()).or_default(),
            r,
        );
    }

    let days = period.days().max(1) as f64;
    let averages = ReportAverages {
        vehicles_per_day: round2(totals.vehicles as f64 / days),
        quantity_per_day: round2(totals.quantity / days),
    };

    ReportSummary {
        period: ReportPeriod {
            start_date: period.start.format("%Y-%m-%d").to_string(),
            end_date: period.end.format("%Y-%m-%d").to_string(),
            days: period.days(),
        },
        totals,
        averages,
        breakdowns,
    }
}

pub async fn get_summary(query: &ReportSummaryQuery) -> Result<ReportSummary, ApiError> {
    let period = Period::parse(
        &query.start_date,
        &query.end_date,
        &query.company_filter,
        &query.water_type_filter,
    )?;
    let receptions = repository::list_matching(&period.filter).await?;
    Ok(summarize(&period, &receptions))
}

/// CSV file name and content of the period export
pub async fn generate_report(request: &ReportRequest) -> Result<(String, Vec<u8>), ApiError> {
    let period = Period::parse(
        &request.start_date,
        &request.end_date,
        &request.company_filter,
        &request.water_type_filter,
    )?;
    let receptions = repository::list_matching(&period.filter).await?;
    let summary = summarize(&period, &receptions);

    let content = super::csv_export::render(request.report_type, &summary, &receptions)?;
    let filename = format!(
        "vehicle_reception_{}_report_{}_{}.csv",
        request.report_type.as_str(),
        period.start.format("%Y%m%d"),
        period.end.format("%Y%m%d")
    );

    tracing::info!(
        "Generated {} report {} ({} receptions)",
        request.report_type.as_str(),
        filename,
        receptions.len()
    );
    Ok((filename, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_vehicle_reception::LegacyReceptionCreate;

    fn reception(company: &str, water: &str, vehicles: i32, quantity: f64) -> VehicleReception {
        let dto = LegacyReceptionCreate {
            date: NaiveDate::from_ymd_opt(2025, 3, 2)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
            company_name: company.into(),
            number_of_vehicles: vehicles,
            water_type: water.into(),
            total_quantity: quantity,
            arrival_time: None,
            departure_time: None,
            exit_time_drilling: None,
            notes: None,
        };
        VehicleReception::new_legacy(&dto, None)
    }

    fn march() -> Period {
        Period::parse("2025-03-01", "2025-03-03", &None, &None).unwrap()
    }

    #[test]
    fn test_empty_period_has_full_shape() {
        let summary = summarize(&march(), &[]);
        assert_eq!(summary.period.days, 3);
        assert_eq!(summary.totals, ReportTotals::default());
        assert_eq!(summary.averages.quantity_per_day, 0.0);
        assert!(summary.breakdowns.companies.is_empty());
    }

    #[test]
    fn test_totals_averages_breakdowns() {
        let rows = vec![
            reception("Apsco", "Sludge", 2, 10.0),
            reception("Apsco", "OBM", 1, 5.0),
            reception("Shelf Drilling", "OBM", 1, 0.5),
        ];
        let summary = summarize(&march(), &rows);

        assert_eq!(summary.totals.receptions, 3);
        assert_eq!(summary.totals.vehicles, 4);
        assert_eq!(summary.totals.quantity, 15.5);
        assert_eq!(summary.averages.vehicles_per_day, 1.33);
        assert_eq!(summary.averages.quantity_per_day, 5.17);

        let apsco = &summary.breakdowns.companies["Apsco"];
        assert_eq!(apsco.receptions, 2);
        assert_eq!(apsco.quantity, 15.0);
        assert_eq!(summary.breakdowns.water_types["OBM"].vehicles, 2);
    }

    #[test]
    fn test_period_validation() {
        assert!(matches!(
            Period::parse("2025-03-05", "2025-03-01", &None, &None),
            Err(ApiError::BadRequest(_))
        ));
        assert!(Period::parse("March", "2025-03-01", &None, &None).is_err());

        let p = Period::parse("2025-03-01", "2025-03-01", &Some(" ".into()), &Some("OBM".into()))
            .unwrap();
        assert_eq!(p.days(), 1);
        assert!(p.filter.company.is_none());
        assert_eq!(p.filter.water_type.as_deref(), Some("OBM"));
    }
}
