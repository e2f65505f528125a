use chrono::Utc;
use contracts::domain::a001_vehicle_reception::{ReceptionId, Vehicle, VehicleReception};
use contracts::domain::common::EntityMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::date_range::DateRange;

pub mod reception {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_vehicle_reception")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub reception_number: String,
        pub date: DateTime,
        pub day_of_week: String,
        pub company_name: String,
        pub water_type: String,
        pub number_of_vehicles: i32,
        pub total_quantity: f64,
        pub arrival_time: Option<DateTime>,
        pub departure_time: Option<DateTime>,
        pub exit_time_drilling: Option<DateTime>,
        pub notes: Option<String>,
        pub invoice_number: Option<String>,
        pub cutting_boxes_amount: Option<f64>,
        pub created_by: Option<String>,
        pub is_deleted: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
        pub version: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod vehicle {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_vehicle_reception_vehicle")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub reception_id: String,
        pub vehicle_order: i32,
        pub vehicle_number: String,
        pub vehicle_type: String,
        pub driver_name: String,
        pub car_brand: String,
        pub vehicle_quantity: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Sortable columns of the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    CompanyName,
    CreatedAt,
    TotalQuantity,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date" => Some(SortField::Date),
            "company_name" => Some(SortField::CompanyName),
            "created_at" => Some(SortField::CreatedAt),
            "total_quantity" => Some(SortField::TotalQuantity),
            _ => None,
        }
    }

    fn column(&self) -> reception::Column {
        match self {
            SortField::Date => reception::Column::Date,
            SortField::CompanyName => reception::Column::CompanyName,
            SortField::CreatedAt => reception::Column::CreatedAt,
            SortField::TotalQuantity => reception::Column::TotalQuantity,
        }
    }
}

/// Row filter shared by the list endpoint and the reports
#[derive(Debug, Clone, Default)]
pub struct ReceptionFilter {
    /// Case-insensitive substring
    pub company: Option<String>,
    /// Case-insensitive substring
    pub water_type: Option<String>,
    pub range: DateRange,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub filter: ReceptionFilter,
    pub offset: u64,
    pub limit: u64,
    pub sort: SortField,
    pub descending: bool,
}

fn parse_uuid(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap_or_else(|_| {
        tracing::warn!("Malformed id '{}' in a001_vehicle_reception", value);
        Uuid::nil()
    })
}

impl From<vehicle::Model> for Vehicle {
    fn from(m: vehicle::Model) -> Self {
        Vehicle {
            id: parse_uuid(&m.id),
            reception_id: parse_uuid(&m.reception_id),
            vehicle_number: m.vehicle_number,
            vehicle_type: m.vehicle_type,
            driver_name: m.driver_name,
            car_brand: m.car_brand,
            vehicle_order: m.vehicle_order,
            vehicle_quantity: m.vehicle_quantity,
        }
    }
}

fn into_aggregate(m: reception::Model, vehicles: Vec<Vehicle>) -> VehicleReception {
    VehicleReception {
        id: ReceptionId::new(parse_uuid(&m.id)),
        reception_number: m.reception_number,
        date: m.date,
        day_of_week: m.day_of_week,
        company_name: m.company_name,
        water_type: m.water_type,
        number_of_vehicles: m.number_of_vehicles,
        total_quantity: m.total_quantity,
        arrival_time: m.arrival_time,
        departure_time: m.departure_time,
        exit_time_drilling: m.exit_time_drilling,
        notes: m.notes,
        invoice_number: m.invoice_number,
        cutting_boxes_amount: m.cutting_boxes_amount,
        created_by: m.created_by,
        metadata: EntityMetadata {
            created_at: m.created_at,
            updated_at: m.updated_at,
            is_deleted: m.is_deleted,
            version: m.version,
        },
        vehicles,
    }
}

fn to_active(aggregate: &VehicleReception) -> reception::ActiveModel {
    reception::ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        reception_number: Set(aggregate.reception_number.clone()),
        date: Set(aggregate.date),
        day_of_week: Set(aggregate.day_of_week.clone()),
        company_name: Set(aggregate.company_name.clone()),
        water_type: Set(aggregate.water_type.clone()),
        number_of_vehicles: Set(aggregate.number_of_vehicles),
        total_quantity: Set(aggregate.total_quantity),
        arrival_time: Set(aggregate.arrival_time),
        departure_time: Set(aggregate.departure_time),
        exit_time_drilling: Set(aggregate.exit_time_drilling),
        notes: Set(aggregate.notes.clone()),
        invoice_number: Set(aggregate.invoice_number.clone()),
        cutting_boxes_amount: Set(aggregate.cutting_boxes_amount),
        created_by: Set(aggregate.created_by.clone()),
        is_deleted: Set(aggregate.metadata.is_deleted),
        created_at: Set(aggregate.metadata.created_at),
        updated_at: Set(aggregate.metadata.updated_at),
        version: Set(aggregate.metadata.version),
    }
}

fn vehicle_active(v: &Vehicle) -> vehicle::ActiveModel {
    vehicle::ActiveModel {
        id: Set(v.id.to_string()),
        reception_id: Set(v.reception_id.to_string()),
        vehicle_order: Set(v.vehicle_order),
        vehicle_number: Set(v.vehicle_number.clone()),
        vehicle_type: Set(v.vehicle_type.clone()),
        driver_name: Set(v.driver_name.clone()),
        car_brand: Set(v.car_brand.clone()),
        vehicle_quantity: Set(v.vehicle_quantity),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// `%value%` with the LIKE wildcards in `value` matched literally
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn substring_of(column: reception::Column, value: &str) -> SimpleExpr {
    Expr::col((reception::Entity, column)).like(LikeExpr::new(like_pattern(value)).escape('\\'))
}

fn filtered(filter: &ReceptionFilter) -> Select<reception::Entity> {
    let mut query = reception::Entity::find().filter(reception::Column::IsDeleted.eq(false));
    if let Some(company) = &filter.company {
        query = query.filter(substring_of(reception::Column::CompanyName, company));
    }
    if let Some(water_type) = &filter.water_type {
        query = query.filter(substring_of(reception::Column::WaterType, water_type));
    }
    if let Some(from) = filter.range.from {
        query = query.filter(reception::Column::Date.gte(from));
    }
    if let Some(to) = filter.range.to_exclusive {
        query = query.filter(reception::Column::Date.lt(to));
    }
    query
}

async fn attach_vehicles(models: Vec<reception::Model>) -> anyhow::Result<Vec<VehicleReception>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
    let mut by_reception: HashMap<String, Vec<Vehicle>> = HashMap::new();
    for v in vehicle::Entity::find()
        .filter(vehicle::Column::ReceptionId.is_in(ids))
        .order_by_asc(vehicle::Column::VehicleOrder)
        .all(conn())
        .await?
    {
        by_reception
            .entry(v.reception_id.clone())
            .or_default()
            .push(v.into());
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let vehicles = by_reception.remove(&m.id).unwrap_or_default();
            into_aggregate(m, vehicles)
        })
        .collect())
}

/// One page of live receptions with their vehicles, plus the filtered total
pub async fn list_with_filters(list: &ListFilter) -> anyhow::Result<(Vec<VehicleReception>, u64)> {
    let total = filtered(&list.filter).count(conn()).await?;

    let order = if list.descending { Order::Desc } else { Order::Asc };
    let models = filtered(&list.filter)
        .order_by(list.sort.column(), order)
        .order_by(reception::Column::Id, Order::Asc)
        .offset(list.offset)
        .limit(list.limit)
        .all(conn())
        .await?;

    Ok((attach_vehicles(models).await?, total))
}

/// Live receptions in the filter, oldest first, without vehicle rows
pub async fn list_matching(filter: &ReceptionFilter) -> anyhow::Result<Vec<VehicleReception>> {
    let models = filtered(filter)
        .order_by_asc(reception::Column::Date)
        .order_by_asc(reception::Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(models
        .into_iter()
        .map(|m| into_aggregate(m, Vec::new()))
        .collect())
}

/// Includes soft-deleted rows; callers decide visibility
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<VehicleReception>> {
    let Some(model) = reception::Entity::find_by_id(id.to_string())
        .one(conn())
        .await?
    else {
        return Ok(None);
    };
    Ok(attach_vehicles(vec![model]).await?.into_iter().next())
}

/// Reception and vehicles in one transaction
pub async fn insert(aggregate: &VehicleReception) -> anyhow::Result<Uuid> {
    let txn = conn().begin().await?;

    to_active(aggregate).insert(&txn).await?;
    if !aggregate.vehicles.is_empty() {
        vehicle::Entity::insert_many(aggregate.vehicles.iter().map(vehicle_active))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(aggregate.id.value())
}

/// Header fields only; vehicle rows are not touched
pub async fn update(aggregate: &VehicleReception) -> anyhow::Result<()> {
    to_active(aggregate).update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    let result = reception::Entity::update_many()
        .col_expr(reception::Column::IsDeleted, Expr::value(true))
        .col_expr(reception::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(reception::Column::Id.eq(id.to_string()))
        .filter(reception::Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Aqua"), "%Aqua%");
        assert_eq!(like_pattern("5%_a\\b"), "%5\\%\\_a\\\\b%");
    }

    #[test]
    fn test_company_filter_is_literal() {
        let filter = ReceptionFilter {
            company: Some("100%".into()),
            ..Default::default()
        };
        let sql = filtered(&filter).build(DbBackend::Sqlite).to_string();
        assert!(sql.contains("LIKE '%100\\%%'"), "{}", sql);
        assert!(sql.contains("ESCAPE"), "{}", sql);
    }
}
