//! Row types for tabular display.

use crate::models::{Budget, Period};
use chrono::NaiveDate;
use serde::Serialize;

/// One line of the budget table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    /// Budget key, used when the limit is edited
    pub pk: i64,
    /// Period label
    pub period: Period,
    /// Spent in the current period
    pub spent: f64,
    /// User-set limit
    pub limit: f64,
    /// `limit - spent`
    pub remaining: f64,
}

impl From<Budget> for BudgetRow {
    fn from(budget: Budget) -> Self {
        Self {
            pk: budget.pk,
            period: budget.period,
            spent: budget.spent,
            limit: budget.limit,
            remaining: budget.remaining(),
        }
    }
}

/// One line of the expense table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRow {
    /// Expense key
    pub pk: i64,
    /// Purchase date
    pub expense_date: NaiveDate,
    /// Amount spent
    pub amount: f64,
    /// Category name, `None` if the category was deleted
    pub category_name: Option<String>,
    /// Free-form note
    pub comment: Option<String>,
}

/// One line of the category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    /// Category key
    pub pk: i64,
    /// Display name
    pub name: String,
}
