use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

use super::migration_runner::build_sqlite_url;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open the SQLite file (created when missing) and keep the connection for the process
pub async fn initialize_database(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_path)
    };

    let conn = Database::connect(build_sqlite_url(&absolute_path)).await?;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA foreign_keys = ON;".to_string(),
    ))
    .await?;

    tracing::info!("Database opened at {}", absolute_path.display());

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// `SELECT 1` against the open connection
pub async fn ping() -> anyhow::Result<()> {
    let conn = DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))?;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "SELECT 1".to_string(),
    ))
    .await?;
    Ok(())
}
