use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Canonical, backend-ready reception submission.
///
/// Timestamps serialize as `YYYY-MM-DDTHH:MM:SS`; absent optionals are
/// omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionCreate {
    pub date: NaiveDateTime,
    pub company_name: String,
    pub water_type: String,
    /// Always the sum of `vehicles[*].vehicle_quantity`
    pub total_quantity: f64,
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
    pub vehicles: Vec<VehicleCreate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCreate {
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub driver_name: String,
    pub car_brand: String,
    /// 1-based, equals the position in `vehicles`
    pub vehicle_order: i32,
    pub vehicle_quantity: f64,
}

impl ReceptionCreate {
    pub fn vehicles_total(&self) -> f64 {
        self.vehicles.iter().map(|v| v.vehicle_quantity).sum()
    }
}
