/// Utilities for date and time formatting
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// First day of the month containing `day`
pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day0(0).unwrap_or(day)
}

pub fn iso_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// `2024-03-15T00:00:00` -> `15.03.2024`
pub fn format_date(value: &NaiveDateTime) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// Time of day or an empty string
pub fn format_time(value: &Option<NaiveDateTime>) -> String {
    value
        .map(|v| v.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// `1234.5` -> `1,234.50`
pub fn format_quantity(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_and_time() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .and_then(|d| d.and_hms_opt(14, 2, 26))
            .unwrap();
        assert_eq!(format_date(&dt), "15.03.2024");
        assert_eq!(format_time(&Some(dt)), "14:02");
        assert_eq!(format_time(&None), "");
    }

    #[test]
    fn test_month_start() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
        assert_eq!(iso_date(month_start(day)), "2025-02-01");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0.0), "0.00");
        assert_eq!(format_quantity(999.5), "999.50");
        assert_eq!(format_quantity(1234.5), "1,234.50");
        assert_eq!(format_quantity(1234567.0), "1,234,567.00");
        assert_eq!(format_quantity(-1500.0), "-1,500.00");
    }
}
