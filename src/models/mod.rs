//! Record types exchanged between the core and its callers.

pub mod budget;
pub mod category;
pub mod expense;
pub mod period;

pub use budget::{Budget, BudgetField};
pub use category::{Category, CategoryField};
pub use expense::{Expense, ExpenseField};
pub use period::Period;
