use contracts::dashboards::d403_financial_report::dto::FinancialReportSummary;

use crate::dashboards::d402_period_report::csv_export::info_row;

pub fn render(summary: &FinancialReportSummary) -> anyhow::Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    info_row(
        &mut wtr,
        "Report Period",
        &format!("{} to {}", summary.period_start, summary.period_end),
    )?;
    info_row(
        &mut wtr,
        "Generated On",
        &summary.generated_at.format("%Y-%m-%d %H:%M").to_string(),
    )?;
    info_row(
        &mut wtr,
        "Total Volume (m3)",
        &format!("{:.2}", summary.total_volume_m3),
    )?;
    for (currency, total) in &summary.totals_by_currency {
        wtr.write_record([format!("Total Cost ({})", currency), format!("{:.2}", total)])?;
    }
    wtr.write_record([""])?;

    wtr.write_record([
        "Company",
        "Volume (m3)",
        "Rate per m3",
        "Currency",
        "Total Cost",
        "Receptions",
    ])?;
    for c in &summary.companies {
        wtr.write_record([
            c.company_name.clone(),
            format!("{:.2}", c.total_volume_m3),
            format!("{:.2}", c.rate_per_m3),
            c.currency.code().to_string(),
            format!("{:.2}", c.total_cost),
            c.reception_count.to_string(),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::dashboards::d403_financial_report::dto::{CompanyFinancialSummary, Currency};
    use std::collections::BTreeMap;

    #[test]
    fn test_render() {
        let summary = FinancialReportSummary {
            period_start: "2025-03-01".into(),
            period_end: "2025-03-31".into(),
            companies: vec![CompanyFinancialSummary {
                company_name: "MK - Unico".into(),
                total_volume_m3: 2.0,
                rate_per_m3: 63.5,
                currency: Currency::Egp,
                total_cost: 127.0,
                reception_count: 1,
            }],
            total_volume_m3: 2.0,
            total_cost: 127.0,
            totals_by_currency: BTreeMap::from([("EGP".to_string(), 127.0)]),
            generated_at: NaiveDate::from_ymd_opt(2025, 4, 1)
                .and_then(|d| d.and_hms_opt(9, 5, 0))
                .unwrap(),
        };

        let text = String::from_utf8(render(&summary).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Generated On,2025-04-01 09:05");
        assert_eq!(lines[3], "Total Cost (EGP),127.00");
        assert_eq!(lines[6], "MK - Unico,2.00,63.50,EGP,127.00,1");
    }
}
