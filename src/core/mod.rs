//! Core business logic - framework-agnostic spending aggregation, category
//! hierarchy and the operations a presentation layer drives.

pub mod bookkeeper;
pub mod category;
pub mod spending;
pub mod views;

pub use bookkeeper::{Bookkeeper, ExpenseInput, SqliteBookkeeper};
pub use spending::{
    PeriodTotals, SpendingRefreshResult, compute_period_totals, ensure_default_budgets,
    refresh_budget_spent,
};
pub use views::{BudgetRow, CategoryRow, ExpenseRow};
