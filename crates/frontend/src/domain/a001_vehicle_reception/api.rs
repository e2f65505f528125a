use contracts::domain::a001_vehicle_reception::{ReceptionListQuery, VehicleReceptionList};
use uuid::Uuid;

use crate::shared::http;

const BASE: &str = "/api/v1/vehicle-receptions";

pub async fn fetch_page(query: &ReceptionListQuery) -> Result<VehicleReceptionList, String> {
    http::get_json_with(BASE, query).await
}

/// Soft delete; only the creator or an admin may do it
pub async fn delete(id: Uuid) -> Result<(), String> {
    http::delete(&format!("{}/{}", BASE, id)).await
}
