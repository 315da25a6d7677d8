//! Database configuration for the bookkeeper storage file.
//!
//! This module opens the `SQLite` file through `SeaORM` and makes sure the three
//! tables exist. Table DDL is generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the models.

use crate::entities::{BudgetEntity, CategoryEntity, ExpenseEntity};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Storage file used when `DATABASE_URL` is not set. `mode=rwc` creates it on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/bookkeeper.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Filesystem path of a `sqlite:` URL, `None` for in-memory databases.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

/// Opens (or creates) the storage file at `database_url`.
///
/// The parent directory of a file-backed database is created if missing.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    debug!("Connecting to {}", database_url);
    Ok(Database::connect(database_url).await?)
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates the category, expense and budget tables if they do not exist yet.
///
/// Safe to call on every start.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, CategoryEntity).await?;
    create_table(db, ExpenseEntity).await?;
    create_table(db, BudgetEntity).await?;
    info!("Database tables ensured.");
    Ok(())
}
