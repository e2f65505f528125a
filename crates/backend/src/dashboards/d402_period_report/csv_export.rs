use contracts::dashboards::d402_period_report::dto::{ReportSummary, ReportType};
use contracts::domain::a001_vehicle_reception::VehicleReception;

const HEADER: [&str; 12] = [
    "Date",
    "Day",
    "Reception Number",
    "Company",
    "Water Type",
    "Vehicles",
    "Quantity (m3)",
    "Arrival",
    "Departure",
    "Exit Time Drilling",
    "Invoice Number",
    "Notes",
];

fn time_cell(value: &Option<chrono::NaiveDateTime>) -> String {
    value
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

pub(crate) fn info_row<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    label: &str,
    value: &str,
) -> csv::Result<()> {
    wtr.write_record([label, value])
}

/// Info block, a blank line, then one row per reception
pub fn render(
    report_type: ReportType,
    summary: &ReportSummary,
    receptions: &[VehicleReception],
) -> anyhow::Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    info_row(&mut wtr, "Report Type", report_type.as_str())?;
    info_row(
        &mut wtr,
        "Report Period",
        &format!("{} to {}", summary.period.start_date, summary.period.end_date),
    )?;
    info_row(&mut wtr, "Total Records", &summary.totals.receptions.to_string())?;
    info_row(&mut wtr, "Total Vehicles", &summary.totals.vehicles.to_string())?;
    info_row(
        &mut wtr,
        "Total Quantity (m3)",
        &format!("{:.2}", summary.totals.quantity),
    )?;
    wtr.write_record([""])?;

    wtr.write_record(HEADER)?;
    for r in receptions {
        wtr.write_record([
            r.date.format("%Y-%m-%d").to_string(),
            r.day_of_week.clone(),
            r.reception_number.clone(),
            r.company_name.clone(),
            r.water_type.clone(),
            r.number_of_vehicles.to_string(),
            format!("{:.2}", r.total_quantity),
            time_cell(&r.arrival_time),
            time_cell(&r.departure_time),
            time_cell(&r.exit_time_drilling),
            r.invoice_number.clone().unwrap_or_default(),
            r.notes.clone().unwrap_or_default(),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_period_report::service::{summarize, Period};
    use chrono::NaiveDate;
    use contracts::domain::a001_vehicle_reception::LegacyReceptionCreate;

    #[test]
    fn test_render_rows() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let dto = LegacyReceptionCreate {
            date: day.and_hms_opt(0, 0, 0).unwrap(),
            company_name: "Amer Group (Port Said)".into(),
            number_of_vehicles: 2,
            water_type: "WBM".into(),
            total_quantity: 12.5,
            arrival_time: day.and_hms_opt(8, 30, 0),
            departure_time: None,
            exit_time_drilling: None,
            notes: Some("gate 2, north".into()),
        };
        let rows = vec![VehicleReception::new_legacy(&dto, None)];
        let period = Period::parse("2025-03-01", "2025-03-31", &None, &None).unwrap();
        let summary = summarize(&period, &rows);

        let bytes = render(ReportType::Monthly, &summary, &rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Report Type,monthly");
        assert_eq!(lines[1], "Report Period,2025-03-01 to 2025-03-31");
        assert!(lines[6].starts_with("Date,Day,Reception Number"));
        assert!(lines[7].starts_with("2025-03-02,Sunday,RCP-"));
        assert!(lines[7].contains(",Amer Group (Port Said),WBM,2,12.50,08:30,,,,\"gate 2, north\""));
    }
}
