use anyhow::Result;
use sea_orm::{FromQueryResult, Statement, Value};

use crate::shared::data::db::get_connection;
use crate::shared::date_range::DateRange;

#[derive(Debug, Clone, FromQueryResult)]
pub struct TotalsRow {
    pub total_receptions: i64,
    pub total_vehicles: i64,
    pub total_quantity: f64,
}

#[derive(Debug, FromQueryResult)]
struct NameRow {
    name: Option<String>,
}

/// `WHERE` clause over live receptions in the range, with its bound values
fn where_clause(range: &DateRange) -> (String, Vec<Value>) {
    let mut sql = String::from("WHERE is_deleted = 0");
    let mut values: Vec<Value> = Vec::new();
    if let Some(from) = range.from {
        sql.push_str(" AND date >= ?");
        values.push(from.into());
    }
    if let Some(to) = range.to_exclusive {
        sql.push_str(" AND date < ?");
        values.push(to.into());
    }
    (sql, values)
}

pub async fn get_totals(range: &DateRange) -> Result<TotalsRow> {
    let (where_sql, values) = where_clause(range);
    let sql = format!(
        r#"
        SELECT
            COUNT(*) AS total_receptions,
            COALESCE(SUM(number_of_vehicles), 0) AS total_vehicles,
            COALESCE(SUM(total_quantity), 0.0) AS total_quantity
        FROM a001_vehicle_reception
        {}
    "#,
        where_sql
    );

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, values);
    let row = TotalsRow::find_by_statement(stmt)
        .one(get_connection())
        .await?;

    Ok(row.unwrap_or(TotalsRow {
        total_receptions: 0,
        total_vehicles: 0,
        total_quantity: 0.0,
    }))
}

/// Distinct values of `column` ("company_name" or "water_type"), sorted
pub async fn get_distinct(column: &'static str, range: &DateRange) -> Result<Vec<String>> {
    let (where_sql, values) = where_clause(range);
    let sql = format!(
        "SELECT DISTINCT {col} AS name FROM a001_vehicle_reception {w} ORDER BY {col}",
        col = column,
        w = where_sql
    );

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, values);
    let rows = NameRow::find_by_statement(stmt)
        .all(get_connection())
        .await?;

    Ok(rows.into_iter().filter_map(|r| r.name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_binds_only_present_bounds() {
        let (sql, values) = where_clause(&DateRange::default());
        assert_eq!(sql, "WHERE is_deleted = 0");
        assert!(values.is_empty());

        let range = DateRange::from_days(Some("2025-01-01"), Some("2025-01-31")).unwrap();
        let (sql, values) = where_clause(&range);
        assert_eq!(sql, "WHERE is_deleted = 0 AND date >= ? AND date < ?");
        assert_eq!(values.len(), 2);
    }
}
