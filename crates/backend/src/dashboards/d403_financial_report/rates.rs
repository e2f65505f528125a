use contracts::dashboards::d403_financial_report::dto::{CompanyRate, CompanyRatesResponse, Currency};
use contracts::shared::options::{canonical_value, OptionKind};

pub const DEFAULT_RATE: f64 = 1.0;
pub const DEFAULT_CURRENCY: Currency = Currency::Usd;

/// (company, water type, rate per m3, currency), keyed by option values
const RATE_TABLE: &[(&str, Option<&str>, f64, Currency)] = &[
    ("Petronifertiti", Some("OBM"), 54.0, Currency::Usd),
    ("Petronifertiti", Some("WBM"), 45.0, Currency::Usd),
    ("Petronifertiti", Some("Oil Contaminated Water"), 15.0, Currency::Usd),
    ("Petronifertiti", Some("Contaminated Water"), 13.0, Currency::Usd),
    ("MK - Unico", None, 63.5, Currency::Egp),
    ("Unico - Qantara", None, 189.70, Currency::Egp),
    ("Apsco", None, 1.0, Currency::Egp),
    ("Amer Group (Port Said)", None, 117.0, Currency::Egp),
    ("Nesbco (North Sinai Petroleum)", None, 1.0, Currency::Usd),
    ("Shelf Drilling", None, 1.0, Currency::Usd),
    ("Other", None, 1.0, Currency::Usd),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    pub amount: f64,
    pub currency: Currency,
}

const DEFAULT: Rate = Rate {
    amount: DEFAULT_RATE,
    currency: DEFAULT_CURRENCY,
};

/// Rate of a company, preferring the water-type-specific entry.
///
/// Names may be option values or labels in either language.
pub fn rate_for(company_name: &str, water_type: Option<&str>) -> Rate {
    let company = canonical_value(OptionKind::Company, company_name).unwrap_or(company_name.trim());
    let water_type = water_type.map(|w| canonical_value(OptionKind::WaterType, w).unwrap_or(w.trim()));

    let mut company_rates = RATE_TABLE.iter().filter(|(c, ..)| *c == company).peekable();
    let Some(first) = company_rates.peek().copied() else {
        return DEFAULT;
    };

    let specific = water_type.and_then(|w| {
        RATE_TABLE
            .iter()
            .find(|(c, t, ..)| *c == company && *t == Some(w))
    });
    let (_, _, amount, currency) = specific.unwrap_or(first);
    Rate {
        amount: *amount,
        currency: *currency,
    }
}

pub fn all_rates() -> CompanyRatesResponse {
    CompanyRatesResponse {
        rates: RATE_TABLE
            .iter()
            .map(|(company, water_type, rate, currency)| CompanyRate {
                company_name: company.to_string(),
                water_type: water_type.map(str::to_string),
                rate: *rate,
                currency: *currency,
            })
            .collect(),
        default_rate: DEFAULT_RATE,
        default_currency: DEFAULT_CURRENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_specific_rate() {
        let rate = rate_for("Petronifertiti", Some("WBM"));
        assert_eq!(rate.amount, 45.0);
        assert_eq!(rate.currency, Currency::Usd);
    }

    #[test]
    fn test_labels_in_either_language() {
        assert_eq!(rate_for("بترونيفرتيتي", Some("زيوت (OBM)")).amount, 54.0);
        assert_eq!(rate_for("عامر جروب (بورتوسعيد)", None).amount, 117.0);
        assert_eq!(rate_for("Amer Group (Port Said)", None).currency, Currency::Egp);
    }

    #[test]
    fn test_falls_back_to_first_company_rate() {
        assert_eq!(rate_for("Petronifertiti", Some("Sludge")).amount, 54.0);
        assert_eq!(rate_for("Petronifertiti", None).amount, 54.0);
        assert_eq!(rate_for("Unico - Qantara", Some("OBM")).amount, 189.70);
    }

    #[test]
    fn test_unknown_company_gets_default() {
        let rate = rate_for("Acme Drilling", Some("OBM"));
        assert_eq!(rate, DEFAULT);
    }

    #[test]
    fn test_all_rates_lists_table() {
        let all = all_rates();
        assert_eq!(all.rates.len(), RATE_TABLE.len());
        assert_eq!(all.default_currency, Currency::Usd);
        assert_eq!(all.rates[0].water_type.as_deref(), Some("OBM"));
    }
}
