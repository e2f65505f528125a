//! Enumerated choices offered by the reception form.
//!
//! Option values are locale-independent and are what gets stored; labels are
//! what the user sees. Every list ends with the [`OTHER`] sentinel which asks
//! the user for a free-text value instead.

use serde::{Deserialize, Serialize};

use super::i18n::Locale;

/// Sentinel option value meaning "the user types a custom value"
pub const OTHER: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Company,
    WaterType,
    VehicleType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

// (value, english label, arabic label)
type Entry = (&'static str, &'static str, &'static str);

const COMPANIES: &[Entry] = &[
    ("Petronifertiti", "Petronifertiti", "بترونيفرتيتي"),
    ("MK - Unico", "MK - Unico", "MK - يونيكو"),
    ("Unico - Qantara", "Unico - Qantara", "يونيكو - قنطرة"),
    ("Apsco", "Apsco", "ابسكو"),
    ("Amer Group (Port Said)", "Amer Group (Port Said)", "عامر جروب (بورتوسعيد)"),
    (
        "Nesbco (North Sinai Petroleum)",
        "Nesbco (North Sinai Petroleum)",
        "نسبكو (شمال سيناء للبترول)",
    ),
    ("Shelf Drilling", "Shelf Drilling", "شيلف ضرلينج"),
    (OTHER, "Other", "أخرى"),
];

const WATER_TYPES: &[Entry] = &[
    ("OBM", "Oils (OBM)", "زيوت (OBM)"),
    ("WBM", "Tafla (WBM)", "طافلة (WBM)"),
    ("Oil Contaminated Water", "Oil Contaminated Water", "مياه ملوثة بالزيت"),
    ("Contaminated Water", "Contaminated Water", "مياه ملوثة"),
    ("Sludge", "Sludge", "حمأة"),
    ("Industrial Waste", "Industrial Waste", "نفايات صناعية"),
    ("Chemical Waste", "Chemical Waste", "نفايات كيميائية"),
    (OTHER, "Other", "أخرى"),
];

const VEHICLE_TYPES: &[Entry] = &[
    ("Tanker", "Tanker", "صهريج"),
    ("Vacuum Truck", "Vacuum Truck", "سيارة شفط"),
    ("Truck", "Truck", "شاحنة"),
    ("Trailer", "Trailer", "مقطورة"),
    (OTHER, "Other", "أخرى"),
];

fn entries(kind: OptionKind) -> &'static [Entry] {
    match kind {
        OptionKind::Company => COMPANIES,
        OptionKind::WaterType => WATER_TYPES,
        OptionKind::VehicleType => VEHICLE_TYPES,
    }
}

fn localize(entry: &Entry, locale: Locale) -> FieldOption {
    let (value, en, ar) = *entry;
    FieldOption {
        value,
        label: match locale {
            Locale::En => en,
            Locale::Ar => ar,
        },
    }
}

/// All option lists for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOptions {
    pub companies: Vec<FieldOption>,
    pub water_types: Vec<FieldOption>,
    pub vehicle_types: Vec<FieldOption>,
}

impl FieldOptions {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            companies: options(OptionKind::Company, locale),
            water_types: options(OptionKind::WaterType, locale),
            vehicle_types: options(OptionKind::VehicleType, locale),
        }
    }

    pub fn get(&self, kind: OptionKind) -> &[FieldOption] {
        match kind {
            OptionKind::Company => &self.companies,
            OptionKind::WaterType => &self.water_types,
            OptionKind::VehicleType => &self.vehicle_types,
        }
    }
}

pub fn options(kind: OptionKind, locale: Locale) -> Vec<FieldOption> {
    entries(kind).iter().map(|e| localize(e, locale)).collect()
}

/// Display label of a stored value; free-text values come back unchanged.
pub fn label_for(kind: OptionKind, locale: Locale, value: &str) -> String {
    entries(kind)
        .iter()
        .find(|(v, _, _)| *v == value)
        .map(|e| localize(e, locale).label.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Map any known label (either language) or value back to its option value.
///
/// Records entered before option values were introduced hold display labels,
/// so lookups that compare against option values go through here first.
pub fn canonical_value(kind: OptionKind, text: &str) -> Option<&'static str> {
    let text = text.trim();
    entries(kind)
        .iter()
        .find(|(v, en, ar)| *v == text || *en == text || *ar == text)
        .map(|(v, _, _)| *v)
}

pub fn is_other(value: &str) -> bool {
    value.trim() == OTHER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_list_ends_with_other_in_both_locales() {
        for locale in Locale::ALL {
            let opts = FieldOptions::for_locale(locale);
            for kind in [
                OptionKind::Company,
                OptionKind::WaterType,
                OptionKind::VehicleType,
            ] {
                let last = opts.get(kind).last().expect("non-empty list");
                assert_eq!(last.value, OTHER);
            }
        }
    }

    #[test]
    fn arabic_other_label() {
        let opts = FieldOptions::for_locale(Locale::Ar);
        assert_eq!(opts.companies.last().map(|o| o.label), Some("أخرى"));
    }

    #[test]
    fn values_are_locale_independent() {
        let en = FieldOptions::for_locale(Locale::En);
        let ar = FieldOptions::for_locale(Locale::Ar);
        let en_values: Vec<_> = en.water_types.iter().map(|o| o.value).collect();
        let ar_values: Vec<_> = ar.water_types.iter().map(|o| o.value).collect();
        assert_eq!(en_values, ar_values);
    }

    #[test]
    fn label_for_known_and_free_text() {
        assert_eq!(
            label_for(OptionKind::WaterType, Locale::Ar, "Contaminated Water"),
            "مياه ملوثة"
        );
        assert_eq!(
            label_for(OptionKind::Company, Locale::Ar, "Acme Drilling"),
            "Acme Drilling"
        );
    }

    #[test]
    fn canonical_value_accepts_arabic_labels() {
        assert_eq!(
            canonical_value(OptionKind::Company, "بترونيفرتيتي"),
            Some("Petronifertiti")
        );
        assert_eq!(
            canonical_value(OptionKind::WaterType, "زيوت (OBM)"),
            Some("OBM")
        );
        assert_eq!(canonical_value(OptionKind::Company, "Unknown Co"), None);
    }
}
