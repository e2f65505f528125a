//! Raw form state of a reception before validation.
//!
//! Every field is kept exactly as typed. Only [`ValidatedDraft`] can be
//! normalized into a payload, and the only way to obtain one is
//! [`super::validation::validate_draft`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleDraft {
    /// Order assigned when the entry was added; may be stale after removals
    pub vehicle_order: i32,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub driver_name: String,
    pub car_brand: String,
    /// Raw quantity text (m³)
    pub vehicle_quantity: String,
}

impl VehicleDraft {
    pub fn blank(order: i32) -> Self {
        Self {
            vehicle_order: order,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionDraft {
    /// `YYYY-MM-DD`
    pub date: String,
    pub company_name: String,
    pub custom_company: String,
    pub water_type: String,
    pub custom_water_type: String,
    /// `HH:MM`, empty when not recorded
    pub arrival_time: String,
    pub departure_time: String,
    pub exit_time_drilling: String,
    pub notes: String,
    pub invoice_number: String,
    pub cutting_boxes_amount: String,
    pub vehicles: Vec<VehicleDraft>,
}

impl ReceptionDraft {
    /// Empty draft dated `today` with one blank vehicle
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            company_name: String::new(),
            custom_company: String::new(),
            water_type: String::new(),
            custom_water_type: String::new(),
            arrival_time: String::new(),
            departure_time: String::new(),
            exit_time_drilling: String::new(),
            notes: String::new(),
            invoice_number: String::new(),
            cutting_boxes_amount: String::new(),
            vehicles: vec![VehicleDraft::blank(1)],
        }
    }

    /// Append a blank vehicle with `order = count + 1`
    pub fn add_vehicle(&mut self) {
        let order = self.vehicles.len() as i32 + 1;
        self.vehicles.push(VehicleDraft::blank(order));
    }

    /// Remove the vehicle at `index` unless it is the only one left.
    ///
    /// Orders of the remaining entries are not touched. Returns whether an
    /// entry was removed.
    pub fn remove_vehicle(&mut self, index: usize) -> bool {
        if self.vehicles.len() <= 1 || index >= self.vehicles.len() {
            return false;
        }
        self.vehicles.remove(index);
        true
    }

    /// Live total of the coerced vehicle quantities
    pub fn total_quantity(&self) -> f64 {
        self.vehicles
            .iter()
            .map(|v| coerce_quantity(&v.vehicle_quantity))
            .sum()
    }
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft(ReceptionDraft);

impl ValidatedDraft {
    /// Only the validator (and tests of this module tree) may vouch for a draft
    pub(super) fn new_unchecked(draft: ReceptionDraft) -> Self {
        Self(draft)
    }

    pub fn draft(&self) -> &ReceptionDraft {
        &self.0
    }

    pub fn into_inner(self) -> ReceptionDraft {
        self.0
    }
}

// ============================================================================
// Lenient parsing of raw input
// ============================================================================

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// `HH:MM` or `HH:MM:SS`
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Parse a number typed by the user; `None` for empty or non-numeric text
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim().replace(',', ".");
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Non-negative quantity, `0` whenever the text is not a usable number
pub fn coerce_quantity(raw: &str) -> f64 {
    parse_number(raw).map(|v| v.max(0.0)).unwrap_or(0.0)
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
    }

    #[test]
    fn new_draft_has_one_vehicle() {
        let d = ReceptionDraft::new(today());
        assert_eq!(d.date, "2025-03-01");
        assert_eq!(d.vehicles.len(), 1);
        assert_eq!(d.vehicles[0].vehicle_order, 1);
    }

    #[test]
    fn add_vehicle_numbers_from_count() {
        let mut d = ReceptionDraft::new(today());
        d.add_vehicle();
        d.add_vehicle();
        let orders: Vec<i32> = d.vehicles.iter().map(|v| v.vehicle_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn remove_vehicle_never_empties_the_list() {
        let mut d = ReceptionDraft::new(today());
        assert!(!d.remove_vehicle(0));
        assert_eq!(d.vehicles.len(), 1);

        d.add_vehicle();
        d.add_vehicle();
        assert!(!d.remove_vehicle(5));
        for _ in 0..10 {
            d.remove_vehicle(0);
        }
        assert_eq!(d.vehicles.len(), 1);
    }

    #[test]
    fn remove_vehicle_keeps_stale_orders() {
        let mut d = ReceptionDraft::new(today());
        d.add_vehicle();
        d.add_vehicle();
        assert!(d.remove_vehicle(0));
        let orders: Vec<i32> = d.vehicles.iter().map(|v| v.vehicle_order).collect();
        assert_eq!(orders, vec![2, 3]);
    }

    #[test]
    fn quantity_coercion() {
        assert_eq!(coerce_quantity("abc"), 0.0);
        assert_eq!(coerce_quantity(""), 0.0);
        assert_eq!(coerce_quantity("NaN"), 0.0);
        assert_eq!(coerce_quantity("-3"), 0.0);
        assert_eq!(coerce_quantity(" 2,5 "), 2.5);
        assert_eq!(coerce_quantity("12"), 12.0);
    }

    #[test]
    fn time_parsing_accepts_seconds() {
        assert!(parse_time("08:30").is_some());
        assert!(parse_time("08:30:15").is_some());
        assert!(parse_time("8.30").is_none());
        assert!(parse_time("").is_none());
    }
}
