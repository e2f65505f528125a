use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a `YYYY-MM-DD` day
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Half-open datetime range built from inclusive days
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    /// Midnight after the last included day
    pub to_exclusive: Option<NaiveDateTime>,
}

impl DateRange {
    /// `Err` names the offending value; blank bounds are open
    pub fn from_days(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        let from = parse_bound(from)?.map(|d| d.and_time(NaiveTime::MIN));
        let to_exclusive = parse_bound(to)?
            .and_then(|d| d.succ_opt())
            .map(|d| d.and_time(NaiveTime::MIN));
        Ok(Self { from, to_exclusive })
    }

    /// Both ends required
    pub fn closed(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate, Self), String> {
        let start = parse_day(from).ok_or_else(|| invalid(from))?;
        let end = parse_day(to).ok_or_else(|| invalid(to))?;
        if end < start {
            return Err("end_date must not be before start_date".to_string());
        }
        let range = Self::from_days(Some(from), Some(to))?;
        Ok((start, end, range))
    }

    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        self.from.map_or(true, |f| *at >= f) && self.to_exclusive.map_or(true, |t| *at < t)
    }
}

fn parse_bound(value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_day(v).map(Some).ok_or_else(|| invalid(v)),
    }
}

fn invalid(value: &str) -> String {
    format!("Invalid date '{}', expected YYYY-MM-DD", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_end_day_is_inclusive() {
        let range = DateRange::from_days(Some("2025-03-01"), Some("2025-03-02")).unwrap();
        assert!(range.contains(&at(2025, 3, 1, 0)));
        assert!(range.contains(&at(2025, 3, 2, 23)));
        assert!(!range.contains(&at(2025, 3, 3, 0)));
        assert!(!range.contains(&at(2025, 2, 28, 23)));
    }

    #[test]
    fn test_blank_bounds_are_open() {
        let range = DateRange::from_days(Some(" "), None).unwrap();
        assert_eq!(range, DateRange::default());
        assert!(range.contains(&at(1999, 1, 1, 0)));
    }

    #[test]
    fn test_malformed_day() {
        assert!(DateRange::from_days(Some("03/01/2025"), None).is_err());
        assert!(DateRange::closed("2025-03-05", "2025-03-01").is_err());
        let (start, end, _) = DateRange::closed("2025-03-01", "2025-03-31").unwrap();
        assert_eq!((end - start).num_days() + 1, 31);
    }
}
