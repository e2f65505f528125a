use contracts::domain::a001_vehicle_reception::{
    LegacyReceptionCreate, ReceptionCreate, ReceptionListQuery, ReceptionUpdate, VehicleReception,
    VehicleReceptionList,
};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository::{self, ListFilter, ReceptionFilter, SortField};
use crate::shared::api_error::ApiError;
use crate::shared::date_range::DateRange;
use crate::system::auth::extractor::CurrentUser;

pub const MAX_PAGE_SIZE: u64 = 100;

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Checks the list query and turns it into a repository filter
pub fn parse_list_query(query: &ReceptionListQuery) -> Result<ListFilter, ApiError> {
    if query.page < 1 {
        return Err(ApiError::Validation("page must be at least 1".into()));
    }
    if query.size < 1 || query.size > MAX_PAGE_SIZE {
        return Err(ApiError::Validation(format!(
            "size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    let sort = SortField::parse(&query.sort_by).ok_or_else(|| {
        ApiError::Validation(format!(
            "sort_by must be one of date, company_name, created_at, total_quantity (got '{}')",
            query.sort_by
        ))
    })?;
    let descending = match query.sort_order.as_str() {
        "desc" => true,
        "asc" => false,
        other => {
            return Err(ApiError::Validation(format!(
                "sort_order must be asc or desc (got '{}')",
                other
            )))
        }
    };
    let range = DateRange::from_days(query.date_from.as_deref(), query.date_to.as_deref())
        .map_err(ApiError::Validation)?;
    // SQLite binds OFFSET as a signed 64-bit value
    let offset = (query.page - 1)
        .checked_mul(query.size)
        .filter(|offset| *offset <= i64::MAX as u64)
        .ok_or_else(|| ApiError::Validation("page is out of range".into()))?;

    Ok(ListFilter {
        filter: ReceptionFilter {
            company: non_blank(&query.company_filter),
            water_type: non_blank(&query.water_type_filter),
            range,
        },
        offset,
        limit: query.size,
        sort,
        descending,
    })
}

/// Admins may change any record, operators only their own
pub fn can_modify(reception: &VehicleReception, user_id: &str, is_admin: bool) -> bool {
    is_admin || reception.created_by.as_deref() == Some(user_id)
}

pub async fn list(query: &ReceptionListQuery) -> Result<VehicleReceptionList, ApiError> {
    let filter = parse_list_query(query)?;
    let (items, total) = repository::list_with_filters(&filter).await?;
    Ok(VehicleReceptionList {
        items,
        total,
        page: query.page,
        size: query.size,
        pages: VehicleReceptionList::page_count(total, query.size),
    })
}

/// Live reception or 404
pub async fn get(id: Uuid) -> Result<VehicleReception, ApiError> {
    repository::get_by_id(id)
        .await?
        .filter(|r| !r.metadata.is_deleted)
        .ok_or_else(|| ApiError::NotFound("Vehicle reception not found".into()))
}

pub async fn create(payload: &ReceptionCreate, user: &CurrentUser) -> Result<VehicleReception, ApiError> {
    let reception = VehicleReception::new_from_payload(payload, Some(user.user_id().to_string()));
    store_new(reception, user).await
}

pub async fn create_legacy(
    dto: &LegacyReceptionCreate,
    user: &CurrentUser,
) -> Result<VehicleReception, ApiError> {
    let reception = VehicleReception::new_legacy(dto, Some(user.user_id().to_string()));
    store_new(reception, user).await
}

async fn store_new(reception: VehicleReception, user: &CurrentUser) -> Result<VehicleReception, ApiError> {
    reception.validate().map_err(ApiError::Validation)?;
    repository::insert(&reception).await?;
    tracing::info!(
        "Reception {} created by '{}': {} vehicle(s), {} m3",
        reception.reception_number,
        user.0.username,
        reception.number_of_vehicles,
        reception.total_quantity
    );
    Ok(reception)
}

pub async fn update(
    id: Uuid,
    dto: &ReceptionUpdate,
    user: &CurrentUser,
) -> Result<VehicleReception, ApiError> {
    let mut reception = get(id).await?;
    if !can_modify(&reception, user.user_id(), user.is_admin()) {
        return Err(ApiError::Forbidden);
    }

    reception.update(dto);
    reception.validate().map_err(ApiError::Validation)?;
    reception.metadata_mut().increment_version();
    reception.before_write();

    repository::update(&reception).await?;
    tracing::info!("Reception {} updated by '{}'", reception.code(), user.0.username);
    Ok(reception)
}

pub async fn delete(id: Uuid, user: &CurrentUser) -> Result<(), ApiError> {
    let reception = get(id).await?;
    if !can_modify(&reception, user.user_id(), user.is_admin()) {
        return Err(ApiError::Forbidden);
    }

    if !repository::soft_delete(id).await? {
        return Err(ApiError::NotFound("Vehicle reception not found".into()));
    }
    tracing::info!("Reception {} deleted by '{}'", reception.code(), user.0.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_vehicle_reception::VehicleCreate;

    fn query() -> ReceptionListQuery {
        ReceptionListQuery::default()
    }

    #[test]
    fn test_default_query() {
        let filter = parse_list_query(&query()).unwrap();
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.sort, SortField::Date);
        assert!(filter.descending);
        assert!(filter.filter.company.is_none());
    }

    #[test]
    fn test_paging_bounds() {
        let mut q = query();
        q.page = 0;
        assert!(parse_list_query(&q).is_err());

        let mut q = query();
        q.size = 101;
        assert!(parse_list_query(&q).is_err());

        let mut q = query();
        q.page = 3;
        q.size = 25;
        let filter = parse_list_query(&q).unwrap();
        assert_eq!(filter.offset, 50);
        assert_eq!(filter.limit, 25);
    }

    #[test]
    fn test_page_out_of_range() {
        let mut q = query();
        q.page = u64::MAX;
        q.size = 100;
        assert!(matches!(parse_list_query(&q), Err(ApiError::Validation(_))));

        q.page = u64::MAX / 100;
        assert!(matches!(parse_list_query(&q), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_sort_whitelist() {
        let mut q = query();
        q.sort_by = "total_quantity".into();
        q.sort_order = "asc".into();
        let filter = parse_list_query(&q).unwrap();
        assert_eq!(filter.sort, SortField::TotalQuantity);
        assert!(!filter.descending);

        q.sort_by = "notes".into();
        assert!(matches!(parse_list_query(&q), Err(ApiError::Validation(_))));

        let mut q = query();
        q.sort_order = "DESC".into();
        assert!(parse_list_query(&q).is_err());
    }

    #[test]
    fn test_filters_and_dates() {
        let mut q = query();
        q.company_filter = Some("  ".into());
        q.water_type_filter = Some(" obm ".into());
        q.date_from = Some("2025-03-01".into());
        q.date_to = Some("2025-03-31".into());
        let filter = parse_list_query(&q).unwrap();
        assert!(filter.filter.company.is_none());
        assert_eq!(filter.filter.water_type.as_deref(), Some("obm"));
        assert_eq!(
            filter.filter.range.to_exclusive,
            NaiveDate::from_ymd_opt(2025, 4, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );

        q.date_to = Some("31.03.2025".into());
        assert!(matches!(parse_list_query(&q), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_ownership() {
        let payload = ReceptionCreate {
            date: NaiveDate::from_ymd_opt(2025, 3, 3)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
            company_name: "Apsco".into(),
            water_type: "Sludge".into(),
            total_quantity: 1.0,
            arrival_time: None,
            departure_time: None,
            exit_time_drilling: None,
            notes: None,
            invoice_number: None,
            cutting_boxes_amount: None,
            vehicles: vec![VehicleCreate {
                vehicle_number: "1".into(),
                vehicle_type: "Tanker".into(),
                driver_name: "D".into(),
                car_brand: "B".into(),
                vehicle_order: 1,
                vehicle_quantity: 1.0,
            }],
        };
        let reception = VehicleReception::new_from_payload(&payload, Some("owner".into()));
        assert!(can_modify(&reception, "owner", false));
        assert!(!can_modify(&reception, "someone", false));
        assert!(can_modify(&reception, "someone", true));
    }
}
