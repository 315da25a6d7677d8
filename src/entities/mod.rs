//! Entity module - Contains the SeaORM entity definitions for the storage file.
//! Each entity has a Model struct for row data and an Entity struct for queries.

pub mod budget;
pub mod category;
pub mod expense;

pub use budget::{Column as BudgetColumn, Entity as BudgetEntity, Model as BudgetModel};
pub use category::{Column as CategoryColumn, Entity as CategoryEntity, Model as CategoryModel};
pub use expense::{Column as ExpenseColumn, Entity as ExpenseEntity, Model as ExpenseModel};
