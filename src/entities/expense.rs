//! Expense entity - one row per recorded purchase.
//!
//! Dates are stored as text in the fixed formats of [`crate::db::format`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Amount spent
    pub amount: f64,
    /// Category id (not a foreign key: categories can be deleted independently)
    pub category: i64,
    /// Optional free-form note
    pub comment: Option<String>,
    /// Creation timestamp, `%Y-%m-%d %H:%M:%S`
    pub added_date: String,
    /// Purchase date, `%Y-%m-%d`
    pub expense_date: String,
}

/// Expense has no declared relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
