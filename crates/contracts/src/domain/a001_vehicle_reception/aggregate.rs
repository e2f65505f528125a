use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payload::{ReceptionCreate, VehicleCreate};
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Server-assigned identifier of a reception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceptionId(pub Uuid);

impl ReceptionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ReceptionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ReceptionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Vehicle (child entity)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub reception_id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub driver_name: String,
    pub car_brand: String,
    /// 1-based position inside the reception
    pub vehicle_order: i32,
    /// m³
    pub vehicle_quantity: f64,
}

impl Vehicle {
    fn from_create(reception_id: Uuid, position: usize, v: &VehicleCreate) -> Self {
        Self {
            id: Uuid::new_v4(),
            reception_id,
            vehicle_number: v.vehicle_number.clone(),
            vehicle_type: v.vehicle_type.clone(),
            driver_name: v.driver_name.clone(),
            car_brand: v.car_brand.clone(),
            vehicle_order: position as i32 + 1,
            vehicle_quantity: v.vehicle_quantity.max(0.0),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// One logged water-delivery event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleReception {
    pub id: ReceptionId,
    pub reception_number: String,
    pub date: NaiveDateTime,
    /// English weekday name of `date` ("Monday")
    pub day_of_week: String,
    pub company_name: String,
    pub water_type: String,
    pub number_of_vehicles: i32,
    /// m³
    pub total_quantity: f64,
    pub arrival_time: Option<NaiveDateTime>,
    pub departure_time: Option<NaiveDateTime>,
    pub exit_time_drilling: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub invoice_number: Option<String>,
    pub cutting_boxes_amount: Option<f64>,
    /// Id of the user who recorded it
    pub created_by: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

impl VehicleReception {
    /// Build a new reception from a canonical payload.
    ///
    /// Vehicle order and the total are recomputed here as well, so a payload
    /// that skipped normalization still yields a consistent record.
    pub fn new_from_payload(payload: &ReceptionCreate, created_by: Option<String>) -> Self {
        let id = ReceptionId::new_v4();
        let metadata = EntityMetadata::new();
        let vehicles: Vec<Vehicle> = payload
            .vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| Vehicle::from_create(id.value(), i, v))
            .collect();
        let total_quantity = vehicles.iter().map(|v| v.vehicle_quantity).sum();

        Self {
            id,
            reception_number: reception_number(&metadata.created_at.naive_utc(), id),
            date: payload.date,
            day_of_week: weekday_name(&payload.date),
            company_name: payload.company_name.trim().to_string(),
            water_type: payload.water_type.trim().to_string(),
            number_of_vehicles: vehicles.len() as i32,
            total_quantity,
            arrival_time: payload.arrival_time,
            departure_time: payload.departure_time,
            exit_time_drilling: payload.exit_time_drilling,
            notes: payload.notes.clone(),
            invoice_number: payload.invoice_number.clone(),
            cutting_boxes_amount: payload.cutting_boxes_amount,
            created_by,
            metadata,
            vehicles,
        }
    }

    /// Build a reception without vehicle detail (legacy entry form)
    pub fn new_legacy(dto: &LegacyReceptionCreate, created_by: Option<String>) -> Self {
        let id = ReceptionId::new_v4();
        let metadata = EntityMetadata::new();
        Self {
            id,
            reception_number: reception_number(&metadata.created_at.naive_utc(), id),
            date: dto.date,
            day_of_week: weekday_name(&dto.date),
            company_name: dto.company_name.trim().to_string(),
            water_type: dto.water_type.trim().to_string(),
            number_of_vehicles: dto.number_of_vehicles,
            total_quantity: dto.total_quantity,
            arrival_time: dto.arrival_time,
            departure_time: dto.departure_time,
            exit_time_drilling: dto.exit_time_drilling,
            notes: dto.notes.clone().filter(|n| !n.trim().is_empty()),
            invoice_number: None,
            cutting_boxes_amount: None,
            created_by,
            metadata,
            vehicles: Vec::new(),
        }
    }

    /// Apply a partial update; the weekday follows the date.
    pub fn update(&mut self, dto: &ReceptionUpdate) {
        if let Some(date) = dto.date {
            self.date = date;
            self.day_of_week = weekday_name(&date);
        }
        if let Some(company) = &dto.company_name {
            self.company_name = company.trim().to_string();
        }
        if let Some(water_type) = &dto.water_type {
            self.water_type = water_type.trim().to_string();
        }
        if let Some(n) = dto.number_of_vehicles {
            self.number_of_vehicles = n;
        }
        if let Some(q) = dto.total_quantity {
            self.total_quantity = q;
        }
        if dto.arrival_time.is_some() {
            self.arrival_time = dto.arrival_time;
        }
        if dto.departure_time.is_some() {
            self.departure_time = dto.departure_time;
        }
        if dto.exit_time_drilling.is_some() {
            self.exit_time_drilling = dto.exit_time_drilling;
        }
        if let Some(notes) = &dto.notes {
            self.notes = Some(notes.clone()).filter(|n| !n.trim().is_empty());
        }
        if let Some(invoice) = &dto.invoice_number {
            self.invoice_number = Some(invoice.clone()).filter(|n| !n.trim().is_empty());
        }
        if dto.cutting_boxes_amount.is_some() {
            self.cutting_boxes_amount = dto.cutting_boxes_amount;
        }
    }

    /// Business checks the server applies regardless of client validation
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.is_empty() {
            return Err("company_name must not be empty".into());
        }
        if self.company_name.chars().count() > 100 {
            return Err("company_name must be at most 100 characters".into());
        }
        if self.water_type.is_empty() {
            return Err("water_type must not be empty".into());
        }
        if self.water_type.chars().count() > 50 {
            return Err("water_type must be at most 50 characters".into());
        }
        if self.number_of_vehicles < 1 {
            return Err("number_of_vehicles must be at least 1".into());
        }
        if !self.total_quantity.is_finite() || self.total_quantity < 0.0 {
            return Err("total_quantity must be a non-negative number".into());
        }
        if let (Some(arrival), Some(departure)) = (self.arrival_time, self.departure_time) {
            if departure <= arrival {
                return Err("departure_time must be after arrival_time".into());
            }
        }
        if let Some(amount) = self.cutting_boxes_amount {
            if amount < 0.0 {
                return Err("cutting_boxes_amount must be non-negative".into());
            }
        }
        if !self.vehicles.is_empty() {
            for (i, v) in self.vehicles.iter().enumerate() {
                if v.vehicle_order != i as i32 + 1 {
                    return Err("vehicle_order must be contiguous from 1".into());
                }
                if v.vehicle_number.trim().is_empty() {
                    return Err(format!("vehicle {}: vehicle_number is required", i + 1));
                }
            }
            let sum: f64 = self.vehicles.iter().map(|v| v.vehicle_quantity).sum();
            if (sum - self.total_quantity).abs() > 1e-9 {
                return Err("total_quantity must equal the sum of vehicle quantities".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for VehicleReception {
    type Id = ReceptionId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.reception_number
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }
}

/// `RCP-YYYYMMDD-XXXXXXXX`: creation date plus the first 8 hex digits of the id
pub fn reception_number(created_at: &NaiveDateTime, id: ReceptionId) -> String {
    let short: String = id
        .value()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();
    format!("RCP-{}-{}", created_at.format("%Y%m%d"), short)
}

pub fn weekday_name(date: &NaiveDateTime) -> String {
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
    .to_string()
}

// ============================================================================
// DTOs
// ============================================================================

/// Create request of the older form that records only aggregate numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyReceptionCreate {
    pub date: NaiveDateTime,
    pub company_name: String,
    pub number_of_vehicles: i32,
    pub water_type: String,
    pub total_quantity: f64,
    #[serde(default)]
    pub arrival_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub departure_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub exit_time_drilling: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceptionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_vehicles: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time_drilling: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutting_boxes_amount: Option<f64>,
}

/// One page of the reception list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleReceptionList {
    pub items: Vec<VehicleReception>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub pages: u64,
}

impl VehicleReceptionList {
    pub fn page_count(total: u64, size: u64) -> u64 {
        if size == 0 {
            0
        } else {
            total.div_ceil(size)
        }
    }
}

/// Query string of the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceptionListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_type_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    10
}

fn default_sort_by() -> String {
    "date".to_string()
}

fn default_sort_order() -> String {
    "desc".to_string()
}

impl Default for ReceptionListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            company_filter: None,
            water_type_filter: None,
            date_from: None,
            date_to: None,
            sort_by: default_sort_by(),
            sort_order: default_sort_order(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(h, min, 0))
            .expect("valid datetime")
    }

    #[test]
    fn test_reception_id_from_string() {
        let id = ReceptionId::new_v4();
        assert_eq!(ReceptionId::from_string(&id.as_string()), Ok(id));
        assert!(ReceptionId::from_string("not-a-uuid").is_err());
    }

    fn payload(quantities: &[f64]) -> ReceptionCreate {
        ReceptionCreate {
            date: at(2025, 3, 3, 0, 0),
            company_name: " Apsco ".into(),
            water_type: "Sludge".into(),
            total_quantity: 999.0,
            arrival_time: None,
            departure_time: None,
            exit_time_drilling: None,
            notes: None,
            invoice_number: None,
            cutting_boxes_amount: None,
            vehicles: quantities
                .iter()
                .enumerate()
                .map(|(i, q)| VehicleCreate {
                    vehicle_number: format!("V-{}", i),
                    vehicle_type: "Tanker".into(),
                    driver_name: "Driver".into(),
                    car_brand: "Volvo".into(),
                    vehicle_order: 7,
                    vehicle_quantity: *q,
                })
                .collect(),
        }
    }

    #[test]
    fn new_from_payload_recomputes_derived_fields() {
        let r = VehicleReception::new_from_payload(&payload(&[1.0, 2.5]), Some("u1".into()));
        assert_eq!(r.total_quantity, 3.5);
        assert_eq!(r.number_of_vehicles, 2);
        assert_eq!(r.day_of_week, "Monday");
        assert_eq!(r.company_name, "Apsco");
        let orders: Vec<i32> = r.vehicles.iter().map(|v| v.vehicle_order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert!(r.vehicles.iter().all(|v| v.reception_id == r.id.value()));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn reception_number_format() {
        let r = VehicleReception::new_from_payload(&payload(&[1.0]), None);
        let parts: Vec<&str> = r.reception_number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "RCP");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 8);
        assert_eq!(parts[2], parts[2].to_uppercase());
    }

    #[test]
    fn update_moves_weekday_with_date() {
        let mut r = VehicleReception::new_from_payload(&payload(&[1.0]), None);
        r.update(&ReceptionUpdate {
            date: Some(at(2025, 3, 7, 0, 0)),
            notes: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(r.day_of_week, "Friday");
        assert_eq!(r.notes, None);
    }

    #[test]
    fn validate_rejects_reversed_times() {
        let mut r = VehicleReception::new_from_payload(&payload(&[1.0]), None);
        r.arrival_time = Some(at(2025, 3, 3, 9, 0));
        r.departure_time = Some(at(2025, 3, 3, 8, 0));
        assert!(r.validate().is_err());
    }

    #[test]
    fn legacy_requires_a_vehicle() {
        let dto = LegacyReceptionCreate {
            date: at(2025, 3, 3, 0, 0),
            company_name: "Apsco".into(),
            number_of_vehicles: 0,
            water_type: "Sludge".into(),
            total_quantity: 10.0,
            arrival_time: None,
            departure_time: None,
            exit_time_drilling: None,
            notes: Some(String::new()),
        };
        let r = VehicleReception::new_legacy(&dto, None);
        assert!(r.notes.is_none());
        assert!(r.validate().is_err());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(VehicleReceptionList::page_count(0, 10), 0);
        assert_eq!(VehicleReceptionList::page_count(10, 10), 1);
        assert_eq!(VehicleReceptionList::page_count(11, 10), 2);
    }

    #[test]
    fn serialized_shape_is_flat() {
        let r = VehicleReception::new_from_payload(&payload(&[1.0]), None);
        let json = serde_json::to_value(&r).expect("serialize");
        assert!(json.get("created_at").is_some());
        assert!(json.get("metadata").is_none());
        let back: VehicleReception = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.reception_number, r.reception_number);
    }
}
