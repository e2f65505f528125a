//! Validated draft -> canonical payload.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::draft::{coerce_quantity, is_blank, parse_date, parse_number, parse_time, ValidatedDraft};
use super::payload::{ReceptionCreate, VehicleCreate};
use crate::shared::options::is_other;

/// Sentinel replaced by the custom text when the latter is non-empty
fn resolve_choice(selected: &str, custom: &str) -> String {
    if is_other(selected) && !is_blank(custom) {
        custom.trim().to_string()
    } else {
        selected.trim().to_string()
    }
}

fn optional_text(raw: &str) -> Option<String> {
    if is_blank(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}

/// `date` + `HH:MM` -> `dateTHH:MM:00`; absent or unparseable time stays absent
fn compose(date: NaiveDate, time: &str) -> Option<NaiveDateTime> {
    if is_blank(time) {
        return None;
    }
    parse_time(time).map(|t| date.and_time(t))
}

pub fn normalize(validated: ValidatedDraft) -> ReceptionCreate {
    let draft = validated.into_inner();

    // Validation guarantees a parseable date; the fallback only keeps this total
    let date = parse_date(&draft.date).unwrap_or_default();
    let vehicles: Vec<VehicleCreate> = draft
        .vehicles
        .iter()
        .enumerate()
        .map(|(i, v)| VehicleCreate {
            vehicle_number: v.vehicle_number.trim().to_string(),
            vehicle_type: v.vehicle_type.trim().to_string(),
            driver_name: v.driver_name.trim().to_string(),
            car_brand: v.car_brand.trim().to_string(),
            vehicle_order: i as i32 + 1,
            vehicle_quantity: coerce_quantity(&v.vehicle_quantity),
        })
        .collect();
    let total_quantity = vehicles.iter().map(|v| v.vehicle_quantity).sum();

    ReceptionCreate {
        date: date.and_time(NaiveTime::MIN),
        company_name: resolve_choice(&draft.company_name, &draft.custom_company),
        water_type: resolve_choice(&draft.water_type, &draft.custom_water_type),
        total_quantity,
        arrival_time: compose(date, &draft.arrival_time),
        departure_time: compose(date, &draft.departure_time),
        exit_time_drilling: compose(date, &draft.exit_time_drilling),
        notes: optional_text(&draft.notes),
        invoice_number: optional_text(&draft.invoice_number),
        cutting_boxes_amount: parse_number(&draft.cutting_boxes_amount).map(|v| v.max(0.0)),
        vehicles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vehicle_reception::draft::{ReceptionDraft, VehicleDraft};
    use crate::domain::a001_vehicle_reception::validation::validate_draft;

    fn vehicle(order: i32, quantity: &str) -> VehicleDraft {
        VehicleDraft {
            vehicle_order: order,
            vehicle_number: format!("V{}", order),
            vehicle_type: "Tanker".into(),
            driver_name: "Driver".into(),
            car_brand: "Volvo".into(),
            vehicle_quantity: quantity.into(),
        }
    }

    fn draft(quantities: &[&str]) -> ReceptionDraft {
        let mut d = ReceptionDraft::new(NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"));
        d.company_name = "Apsco".into();
        d.water_type = "Sludge".into();
        d.vehicles = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| vehicle(i as i32 + 1, q))
            .collect();
        d
    }

    fn run(d: ReceptionDraft) -> ReceptionCreate {
        normalize(validate_draft(&d).expect("valid draft"))
    }

    #[test]
    fn total_is_sum_of_vehicle_quantities() {
        let p = run(draft(&["1", "2.5"]));
        assert_eq!(p.total_quantity, 3.5);
        assert_eq!(p.total_quantity, p.vehicles_total());
    }

    #[test]
    fn order_follows_position_not_stored_value() {
        let mut d = draft(&["1", "2", "3"]);
        d.vehicles[0].vehicle_order = 9;
        d.vehicles[1].vehicle_order = 9;
        d.vehicles[2].vehicle_order = -4;
        let p = run(d);
        let orders: Vec<i32> = p.vehicles.iter().map(|v| v.vehicle_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn order_is_contiguous_after_removal() {
        let mut d = draft(&["1", "2", "3"]);
        assert!(d.remove_vehicle(1));
        let p = run(d);
        let orders: Vec<i32> = p.vehicles.iter().map(|v| v.vehicle_order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(p.vehicles[1].vehicle_number, "V3");
    }

    #[test]
    fn other_is_replaced_by_custom_value() {
        let mut d = draft(&["1"]);
        d.company_name = "Other".into();
        d.custom_company = " Delta Rigs ".into();
        d.water_type = "Other".into();
        d.custom_water_type = "Brine".into();
        let p = run(d);
        assert_eq!(p.company_name, "Delta Rigs");
        assert_eq!(p.water_type, "Brine");
    }

    #[test]
    fn other_without_custom_value_stays() {
        let mut d = draft(&["1"]);
        d.company_name = "Other".into();
        assert_eq!(run(d).company_name, "Other");
    }

    #[test]
    fn custom_text_ignored_for_regular_choice() {
        let mut d = draft(&["1"]);
        d.custom_company = "Leftover".into();
        assert_eq!(run(d).company_name, "Apsco");
    }

    #[test]
    fn garbage_quantity_becomes_zero() {
        let mut d = draft(&["abc", "2"]);
        d.vehicles[0].vehicle_quantity = "abc".into();
        let p = normalize(ValidatedDraft::new_unchecked(d));
        assert_eq!(p.vehicles[0].vehicle_quantity, 0.0);
        assert!(!p.vehicles[0].vehicle_quantity.is_nan());
        assert_eq!(p.total_quantity, 2.0);
    }

    #[test]
    fn date_and_times_are_composed() {
        let mut d = draft(&["1"]);
        d.arrival_time = "08:15".into();
        d.departure_time = "10:40".into();
        let p = run(d);
        let json = serde_json::to_value(&p).expect("serialize");
        assert_eq!(json["date"], "2025-03-01T00:00:00");
        assert_eq!(json["arrival_time"], "2025-03-01T08:15:00");
        assert_eq!(json["departure_time"], "2025-03-01T10:40:00");
        assert!(json.get("exit_time_drilling").is_none());
    }

    #[test]
    fn empty_optionals_are_omitted() {
        let mut d = draft(&["1"]);
        d.notes = String::new();
        d.invoice_number = "   ".into();
        d.cutting_boxes_amount = String::new();
        let p = run(d);
        assert_eq!(p.notes, None);
        let json = serde_json::to_value(&p).expect("serialize");
        assert!(json.get("notes").is_none());
        assert!(json.get("invoice_number").is_none());
        assert!(json.get("cutting_boxes_amount").is_none());
    }

    #[test]
    fn filled_optionals_are_kept() {
        let mut d = draft(&["1"]);
        d.notes = " late arrival ".into();
        d.invoice_number = "INV-7".into();
        d.cutting_boxes_amount = "4".into();
        let p = run(d);
        assert_eq!(p.notes.as_deref(), Some("late arrival"));
        assert_eq!(p.invoice_number.as_deref(), Some("INV-7"));
        assert_eq!(p.cutting_boxes_amount, Some(4.0));
    }
}
