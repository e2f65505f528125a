use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_vehicle_reception::{
    LegacyReceptionCreate, ReceptionCreate, ReceptionId, ReceptionListQuery, ReceptionUpdate,
    VehicleReception, VehicleReceptionList,
};
use contracts::domain::common::AggregateId;
use uuid::Uuid;

use crate::domain::a001_vehicle_reception::service;
use crate::shared::api_error::ApiError;
use crate::system::auth::extractor::CurrentUser;

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    ReceptionId::from_string(id)
        .map(|id| id.value())
        .map_err(|_| ApiError::NotFound("Vehicle reception not found".into()))
}

/// GET /api/v1/vehicle-receptions
pub async fn list(Query(query): Query<ReceptionListQuery>) -> Result<Json<VehicleReceptionList>, ApiError> {
    Ok(Json(service::list(&query).await?))
}

/// GET /api/v1/vehicle-receptions/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<VehicleReception>, ApiError> {
    Ok(Json(service::get(parse_id(&id)?).await?))
}

/// POST /api/v1/vehicle-receptions/enhanced
pub async fn create_enhanced(
    user: CurrentUser,
    Json(payload): Json<ReceptionCreate>,
) -> Result<(StatusCode, Json<VehicleReception>), ApiError> {
    let created = service::create(&payload, &user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/v1/vehicle-receptions
pub async fn create_legacy(
    user: CurrentUser,
    Json(dto): Json<LegacyReceptionCreate>,
) -> Result<(StatusCode, Json<VehicleReception>), ApiError> {
    let created = service::create_legacy(&dto, &user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/vehicle-receptions/:id
pub async fn update(
    user: CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<ReceptionUpdate>,
) -> Result<Json<VehicleReception>, ApiError> {
    Ok(Json(service::update(parse_id(&id)?, &dto, &user).await?))
}

/// DELETE /api/v1/vehicle-receptions/:id
pub async fn delete(user: CurrentUser, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    service::delete(parse_id(&id)?, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
