//! Budget entity - one row per budget period.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget")]
pub struct Model {
    /// Unique identifier for the budget row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Period label: `"day"`, `"week"` or `"month"`
    pub period: String,
    /// User-set spending ceiling
    pub limit: f64,
    /// Amount spent in the current period
    pub spent: f64,
}

/// Budget has no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
