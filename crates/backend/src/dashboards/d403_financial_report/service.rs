use chrono::Utc;
use contracts::dashboards::d403_financial_report::dto::{
    CompanyFinancialSummary, FinancialReportRequest, FinancialReportSummary,
};
use contracts::domain::a001_vehicle_reception::VehicleReception;
use std::collections::{BTreeMap, HashMap};

use super::rates;
use crate::dashboards::d402_period_report::service::Period;
use crate::domain::a001_vehicle_reception::repository;
use crate::shared::api_error::ApiError;
use crate::shared::format::round2;

#[derive(Default)]
struct CompanyAccumulator {
    volume: f64,
    cost: f64,
    count: u64,
}

/// Per-company volume and cost, highest cost first
pub fn summarize(request: &FinancialReportRequest, receptions: &[VehicleReception]) -> FinancialReportSummary {
    let mut by_company: HashMap<&str, CompanyAccumulator> = HashMap::new();
    for r in receptions {
        let rate = rates::rate_for(&r.company_name, Some(&r.water_type));
        let acc = by_company.entry(r.company_name.as_str()).or_default();
        acc.volume += r.total_quantity;
        acc.cost += r.total_quantity * rate.amount;
        acc.count += 1;
    }

    let mut companies: Vec<CompanyFinancialSummary> = by_company
        .into_iter()
        .map(|(name, acc)| {
            let company_rate = rates::rate_for(name, None);
            let rate_per_m3 = if acc.volume > 0.0 {
                round2(acc.cost / acc.volume)
            } else {
                company_rate.amount
            };
            CompanyFinancialSummary {
                company_name: name.to_string(),
                total_volume_m3: acc.volume,
                rate_per_m3,
                currency: company_rate.currency,
                total_cost: round2(acc.cost),
                reception_count: acc.count,
            }
        })
        .collect();

    companies.sort_by(|a, b| {
        b.total_cost
            .total_cmp(&a.total_cost)
            .then_with(|| a.company_name.cmp(&b.company_name))
    });

    let mut totals_by_currency: BTreeMap<String, f64> = BTreeMap::new();
    for c in &companies {
        *totals_by_currency
            .entry(c.currency.code().to_string())
            .or_default() += c.total_cost;
    }
    for total in totals_by_currency.values_mut() {
        *total = round2(*total);
    }

    FinancialReportSummary {
        period_start: request.start_date.clone(),
        period_end: request.end_date.clone(),
        total_volume_m3: companies.iter().map(|c| c.total_volume_m3).sum(),
        total_cost: round2(companies.iter().map(|c| c.total_cost).sum()),
        companies,
        totals_by_currency,
        generated_at: Utc::now().naive_utc(),
    }
}

pub async fn get_summary(request: &FinancialReportRequest) -> Result<FinancialReportSummary, ApiError> {
    let period = Period::parse(
        &request.start_date,
        &request.end_date,
        &request.company_filter,
        &None,
    )?;
    let receptions = repository::list_matching(&period.filter).await?;
    Ok(summarize(request, &receptions))
}

/// CSV file name and content of the financial export
pub async fn generate_report(request: &FinancialReportRequest) -> Result<(String, Vec<u8>), ApiError> {
    let summary = get_summary(request).await?;
    let content = super::csv_export::render(&summary)?;
    let filename = format!(
        "financial_report_{}_{}.csv",
        request.start_date.replace('-', ""),
        request.end_date.replace('-', "")
    );
    tracing::info!(
        "Generated financial report {} ({} companies)",
        filename,
        summary.companies.len()
    );
    Ok((filename, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::dashboards::d403_financial_report::dto::Currency;
    use contracts::domain::a001_vehicle_reception::LegacyReceptionCreate;

    fn reception(company: &str, water: &str, quantity: f64) -> VehicleReception {
        let dto = LegacyReceptionCreate {
            date: NaiveDate::from_ymd_opt(2025, 3, 2)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
            company_name: company.into(),
            number_of_vehicles: 1,
            water_type: water.into(),
            total_quantity: quantity,
            arrival_time: None,
            departure_time: None,
            exit_time_drilling: None,
            notes: None,
        };
        VehicleReception::new_legacy(&dto, None)
    }

    fn request() -> FinancialReportRequest {
        FinancialReportRequest {
            start_date: "2025-03-01".into(),
            end_date: "2025-03-31".into(),
            company_filter: None,
        }
    }

    #[test]
    fn test_empty_period() {
        let summary = summarize(&request(), &[]);
        assert!(summary.companies.is_empty());
        assert_eq!(summary.total_cost, 0.0);
        assert!(summary.totals_by_currency.is_empty());
        assert_eq!(summary.period_start, "2025-03-01");
    }

    #[test]
    fn test_type_aware_cost_and_effective_rate() {
        let rows = vec![
            reception("Petronifertiti", "OBM", 10.0),
            reception("Petronifertiti", "WBM", 10.0),
            reception("Apsco", "Sludge", 3.0),
        ];
        let summary = summarize(&request(), &rows);

        let petro = &summary.companies[0];
        assert_eq!(petro.company_name, "Petronifertiti");
        assert_eq!(petro.total_volume_m3, 20.0);
        assert_eq!(petro.total_cost, 990.0);
        assert_eq!(petro.rate_per_m3, 49.5);
        assert_eq!(petro.currency, Currency::Usd);
        assert_eq!(petro.reception_count, 2);

        let apsco = &summary.companies[1];
        assert_eq!(apsco.total_cost, 3.0);
        assert_eq!(apsco.currency, Currency::Egp);

        assert_eq!(summary.total_volume_m3, 23.0);
        assert_eq!(summary.total_cost, 993.0);
        assert_eq!(summary.totals_by_currency["USD"], 990.0);
        assert_eq!(summary.totals_by_currency["EGP"], 3.0);
    }

    #[test]
    fn test_sorted_by_cost_desc() {
        let rows = vec![
            reception("Shelf Drilling", "OBM", 5.0),
            reception("Amer Group (Port Said)", "OBM", 2.0),
        ];
        let summary = summarize(&request(), &rows);
        let names: Vec<&str> = summary.companies.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Amer Group (Port Said)", "Shelf Drilling"]);
    }
}
