use contracts::domain::a001_vehicle_reception::ReceptionListQuery;

pub const PAGE_SIZE: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Date,
    CompanyName,
    CreatedAt,
    TotalQuantity,
}

impl SortColumn {
    /// Name accepted by the `sort_by` parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SortColumn::Date => "date",
            SortColumn::CompanyName => "company_name",
            SortColumn::CreatedAt => "created_at",
            SortColumn::TotalQuantity => "total_quantity",
        }
    }
}

/// Filters, sort and page of the receptions table
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub company_filter: String,
    pub water_type_filter: String,
    /// `YYYY-MM-DD` or empty
    pub date_from: String,
    pub date_to: String,
    pub sort: SortColumn,
    pub descending: bool,
    /// 1-based
    pub page: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            company_filter: String::new(),
            water_type_filter: String::new(),
            date_from: String::new(),
            date_to: String::new(),
            sort: SortColumn::Date,
            descending: true,
            page: 1,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ListState {
    // Every filter change starts again from the first page

    pub fn set_company(&mut self, value: String) {
        self.company_filter = value;
        self.page = 1;
    }

    pub fn set_water_type(&mut self, value: String) {
        self.water_type_filter = value;
        self.page = 1;
    }

    pub fn set_date_from(&mut self, value: String) {
        self.date_from = value;
        self.page = 1;
    }

    pub fn set_date_to(&mut self, value: String) {
        self.date_to = value;
        self.page = 1;
    }

    /// Clicking the active column flips the direction; a new column sorts descending
    pub fn sort_on(&mut self, column: SortColumn) {
        if self.sort == column {
            self.descending = !self.descending;
        } else {
            self.sort = column;
            self.descending = true;
        }
        self.page = 1;
    }

    pub fn sort_marker(&self, column: SortColumn) -> &'static str {
        match (self.sort == column, self.descending) {
            (false, _) => "",
            (true, true) => " \u{25BC}",
            (true, false) => " \u{25B2}",
        }
    }

    pub fn to_query(&self) -> ReceptionListQuery {
        ReceptionListQuery {
            page: self.page.max(1),
            size: PAGE_SIZE,
            company_filter: non_blank(&self.company_filter),
            water_type_filter: non_blank(&self.water_type_filter),
            date_from: non_blank(&self.date_from),
            date_to: non_blank(&self.date_to),
            sort_by: self.sort.as_param().to_string(),
            sort_order: if self.descending { "desc" } else { "asc" }.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let q = ListState::default().to_query();
        assert_eq!(q.page, 1);
        assert_eq!(q.size, PAGE_SIZE);
        assert_eq!(q.sort_by, "date");
        assert_eq!(q.sort_order, "desc");
        assert!(q.company_filter.is_none());
        assert!(q.date_from.is_none());
    }

    #[test]
    fn test_filters_reset_page() {
        let mut s = ListState {
            page: 4,
            ..Default::default()
        };
        s.set_company("  Apsco ".into());
        assert_eq!(s.page, 1);
        assert_eq!(s.to_query().company_filter.as_deref(), Some("Apsco"));

        s.page = 3;
        s.set_date_to("2025-03-31".into());
        assert_eq!(s.page, 1);
        assert_eq!(s.to_query().date_to.as_deref(), Some("2025-03-31"));
    }

    #[test]
    fn test_sort_toggle() {
        let mut s = ListState::default();
        s.sort_on(SortColumn::Date);
        assert!(!s.descending);
        assert_eq!(s.to_query().sort_order, "asc");

        s.sort_on(SortColumn::TotalQuantity);
        assert!(s.descending);
        assert_eq!(s.to_query().sort_by, "total_quantity");
        assert_eq!(s.sort_marker(SortColumn::Date), "");
        assert_eq!(s.sort_marker(SortColumn::TotalQuantity), " \u{25BC}");
    }
}
