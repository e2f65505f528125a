use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::draft::{is_blank, parse_date, parse_number, parse_time, ReceptionDraft, ValidatedDraft};
use crate::shared::i18n::{t, Locale};

/// Form field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Date,
    Company,
    WaterType,
    ArrivalTime,
    DepartureTime,
    ExitTime,
    CuttingBoxes,
    VehicleNumber(usize),
    VehicleType(usize),
    DriverName(usize),
    CarBrand(usize),
    VehicleQuantity(usize),
}

impl FieldKey {
    /// Index of the vehicle entry the key belongs to
    pub fn vehicle_index(&self) -> Option<usize> {
        match self {
            FieldKey::VehicleNumber(i)
            | FieldKey::VehicleType(i)
            | FieldKey::DriverName(i)
            | FieldKey::CarBrand(i)
            | FieldKey::VehicleQuantity(i) => Some(*i),
            _ => None,
        }
    }
}

/// Per-field validation errors, stored as message keys and localized on read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FieldKey, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the first error reported for a field
    pub fn add(&mut self, key: FieldKey, message_key: &'static str) {
        self.0.entry(key).or_insert(message_key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn message_key(&self, key: FieldKey) -> Option<&'static str> {
        self.0.get(&key).copied()
    }

    pub fn message(&self, key: FieldKey, locale: Locale) -> Option<&'static str> {
        self.message_key(key).map(|k| t(locale, k))
    }

    pub fn messages(&self, locale: Locale) -> Vec<(FieldKey, &'static str)> {
        self.0.iter().map(|(k, m)| (*k, t(locale, *m))).collect()
    }
}

// Fixed reference date for comparing times of day
fn reference_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2000, 1, 1)
}

/// Departure must be strictly after arrival when both are present.
///
/// Returns the message key of the violation. Unparseable times are reported
/// by [`validate_draft`] instead, so they do not count as a violation here.
pub fn time_order_error(arrival: &str, departure: &str) -> Option<&'static str> {
    if is_blank(arrival) || is_blank(departure) {
        return None;
    }
    let day = reference_date()?;
    let arrival = day.and_time(parse_time(arrival)?);
    let departure = day.and_time(parse_time(departure)?);
    if departure <= arrival {
        Some("form.timeOrder")
    } else {
        None
    }
}

fn check_optional_time(errors: &mut FieldErrors, key: FieldKey, raw: &str) {
    if !is_blank(raw) && parse_time(raw).is_none() {
        errors.add(key, "form.timeInvalid");
    }
}

/// Run every field rule over `draft`.
///
/// An `"Other"` selection with empty custom text is accepted and the sentinel
/// is stored as-is.
pub fn validate_draft(draft: &ReceptionDraft) -> Result<ValidatedDraft, FieldErrors> {
    let errors = collect_errors(draft);
    if errors.is_empty() {
        Ok(ValidatedDraft::new_unchecked(draft.clone()))
    } else {
        Err(errors)
    }
}

pub fn collect_errors(draft: &ReceptionDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&draft.date) {
        errors.add(FieldKey::Date, "form.dateRequired");
    } else if parse_date(&draft.date).is_none() {
        errors.add(FieldKey::Date, "form.dateInvalid");
    }
    if is_blank(&draft.company_name) {
        errors.add(FieldKey::Company, "form.companyRequired");
    }
    if is_blank(&draft.water_type) {
        errors.add(FieldKey::WaterType, "form.waterTypeRequired");
    }

    check_optional_time(&mut errors, FieldKey::ArrivalTime, &draft.arrival_time);
    check_optional_time(&mut errors, FieldKey::DepartureTime, &draft.departure_time);
    check_optional_time(&mut errors, FieldKey::ExitTime, &draft.exit_time_drilling);
    if let Some(msg) = time_order_error(&draft.arrival_time, &draft.departure_time) {
        errors.add(FieldKey::ArrivalTime, msg);
        errors.add(FieldKey::DepartureTime, msg);
    }

    if !is_blank(&draft.cutting_boxes_amount) {
        match parse_number(&draft.cutting_boxes_amount) {
            Some(v) if v >= 0.0 => {}
            _ => errors.add(FieldKey::CuttingBoxes, "form.amountInvalid"),
        }
    }

    for (i, v) in draft.vehicles.iter().enumerate() {
        if is_blank(&v.vehicle_number) {
            errors.add(FieldKey::VehicleNumber(i), "form.vehicleNumberRequired");
        }
        if is_blank(&v.vehicle_type) {
            errors.add(FieldKey::VehicleType(i), "form.vehicleTypeRequired");
        }
        if is_blank(&v.driver_name) {
            errors.add(FieldKey::DriverName(i), "form.driverNameRequired");
        }
        if is_blank(&v.car_brand) {
            errors.add(FieldKey::CarBrand(i), "form.carBrandRequired");
        }
        if is_blank(&v.vehicle_quantity) {
            errors.add(FieldKey::VehicleQuantity(i), "form.vehicleQuantityRequired");
        } else {
            match parse_number(&v.vehicle_quantity) {
                Some(q) if q < 0.0 => errors.add(FieldKey::VehicleQuantity(i), "form.quantityMin"),
                Some(_) => {}
                None => errors.add(FieldKey::VehicleQuantity(i), "form.amountInvalid"),
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vehicle_reception::draft::VehicleDraft;

    fn filled() -> ReceptionDraft {
        let mut d = ReceptionDraft::new(NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"));
        d.company_name = "Apsco".into();
        d.water_type = "Sludge".into();
        d.vehicles[0] = VehicleDraft {
            vehicle_order: 1,
            vehicle_number: "ABC 123".into(),
            vehicle_type: "Tanker".into(),
            driver_name: "Ahmed".into(),
            car_brand: "Volvo".into(),
            vehicle_quantity: "20".into(),
        };
        d
    }

    #[test]
    fn complete_draft_passes() {
        assert!(validate_draft(&filled()).is_ok());
    }

    #[test]
    fn required_fields_are_reported() {
        let mut d = filled();
        d.date.clear();
        d.company_name = "  ".into();
        d.water_type.clear();
        d.add_vehicle();
        let errors = validate_draft(&d).expect_err("must fail");
        assert_eq!(errors.message_key(FieldKey::Date), Some("form.dateRequired"));
        assert!(errors.contains(FieldKey::Company));
        assert!(errors.contains(FieldKey::WaterType));
        assert!(!errors.contains(FieldKey::VehicleNumber(0)));
        for key in [
            FieldKey::VehicleNumber(1),
            FieldKey::VehicleType(1),
            FieldKey::DriverName(1),
            FieldKey::CarBrand(1),
            FieldKey::VehicleQuantity(1),
        ] {
            assert!(errors.contains(key), "{:?}", key);
        }
    }

    #[test]
    fn reversed_times_fail_on_both_fields() {
        let mut d = filled();
        d.arrival_time = "09:00".into();
        d.departure_time = "08:00".into();
        let errors = validate_draft(&d).expect_err("must fail");
        assert_eq!(errors.message_key(FieldKey::ArrivalTime), Some("form.timeOrder"));
        assert_eq!(errors.message_key(FieldKey::DepartureTime), Some("form.timeOrder"));
    }

    #[test]
    fn ordered_times_pass() {
        let mut d = filled();
        d.arrival_time = "08:00".into();
        d.departure_time = "09:00".into();
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn time_order_is_vacuous_when_one_side_missing() {
        assert_eq!(time_order_error("09:00", ""), None);
        assert_eq!(time_order_error("", "08:00"), None);
        assert_eq!(time_order_error("09:00", "09:00"), Some("form.timeOrder"));
    }

    #[test]
    fn negative_and_garbage_quantities() {
        let mut d = filled();
        d.vehicles[0].vehicle_quantity = "-1".into();
        let errors = validate_draft(&d).expect_err("must fail");
        assert_eq!(
            errors.message_key(FieldKey::VehicleQuantity(0)),
            Some("form.quantityMin")
        );

        d.vehicles[0].vehicle_quantity = "abc".into();
        assert!(validate_draft(&d).is_err());
    }

    #[test]
    fn other_without_custom_text_is_accepted() {
        let mut d = filled();
        d.company_name = "Other".into();
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn messages_are_localized() {
        let mut d = filled();
        d.company_name.clear();
        let errors = validate_draft(&d).expect_err("must fail");
        assert_eq!(
            errors.message(FieldKey::Company, Locale::En),
            Some("Company is required")
        );
        assert_eq!(errors.message(FieldKey::Company, Locale::Ar), Some("الشركة مطلوبة"));
    }
}
