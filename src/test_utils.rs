//! Shared test utilities for the bookkeeper core.
//!
//! This module provides helpers for setting up test databases and creating
//! records with sensible defaults.

use crate::{
    config::database::create_tables,
    db::Repository,
    errors::Result,
    models::{Category, Expense},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Stores a top-level category named `name`.
pub async fn create_test_category(
    repo: &impl Repository<Category>,
    name: &str,
) -> Result<Category> {
    let mut category = Category::new(name, None)?;
    repo.add(&mut category).await?;
    Ok(category)
}

/// Stores an expense without a comment.
pub async fn create_test_expense(
    repo: &impl Repository<Expense>,
    amount: f64,
    category: i64,
    expense_date: NaiveDate,
) -> Result<Expense> {
    let mut expense = Expense::new(amount, category, expense_date)?;
    repo.add(&mut expense).await?;
    Ok(expense)
}
