//! Operations a presentation layer calls: table views and edit callbacks.
//!
//! [`Bookkeeper`] owns one repository per record type and is generic over the
//! backend. [`SqliteBookkeeper`] wires it to the storage file.

use super::category::find_category_by_name;
use super::spending::{SpendingRefreshResult, ensure_default_budgets, refresh_budget_spent};
use super::views::{BudgetRow, CategoryRow, ExpenseRow};
use crate::{
    config::CategoryConfig,
    db::{Filter, Repository, SqliteRepository},
    errors::{Error, Result},
    models::{
        Budget, Category, Expense,
        expense::{normalize_comment, validate_amount},
    },
};
use chrono::{Local, NaiveDate};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Expense fields as entered by the user. The category is given by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    /// Amount spent
    pub amount: f64,
    /// Display name of an existing category
    pub category: String,
    /// Optional note
    pub comment: Option<String>,
    /// Purchase date
    pub expense_date: NaiveDate,
}

/// Application core over three repositories.
#[derive(Debug)]
pub struct Bookkeeper<C, E, B> {
    categories: C,
    expenses: E,
    budgets: B,
}

/// [`Bookkeeper`] backed by the `SQLite` storage file.
pub type SqliteBookkeeper =
    Bookkeeper<SqliteRepository<Category>, SqliteRepository<Expense>, SqliteRepository<Budget>>;

impl SqliteBookkeeper {
    /// Binds all three repositories to one open connection.
    #[must_use]
    pub fn open(db: &DatabaseConnection) -> Self {
        Self::new(
            SqliteRepository::new(db.clone()),
            SqliteRepository::new(db.clone()),
            SqliteRepository::new(db.clone()),
        )
    }
}

impl<C, E, B> Bookkeeper<C, E, B>
where
    C: Repository<Category>,
    E: Repository<Expense>,
    B: Repository<Budget>,
{
    /// Wraps existing repositories.
    pub const fn new(categories: C, expenses: E, budgets: B) -> Self {
        Self {
            categories,
            expenses,
            budgets,
        }
    }

    /// Category repository.
    pub const fn categories(&self) -> &C {
        &self.categories
    }

    /// Expense repository.
    pub const fn expenses(&self) -> &E {
        &self.expenses
    }

    /// Budget repository.
    pub const fn budgets(&self) -> &B {
        &self.budgets
    }

    /// First-run setup: the three budget rows and, if there are no categories
    /// yet, the configured default categories.
    #[instrument(skip_all)]
    pub async fn bootstrap(&self, default_categories: &[CategoryConfig]) -> Result<()> {
        ensure_default_budgets(&self.budgets).await?;
        if self.categories.get_all(&Filter::new()).await?.is_empty() {
            self.seed_categories(default_categories).await?;
        }
        Ok(())
    }

    async fn seed_categories(&self, configs: &[CategoryConfig]) -> Result<()> {
        let mut seeded: HashMap<&str, i64> = HashMap::new();
        for config in configs {
            let parent = match config.parent.as_deref() {
                None => None,
                Some(name) => match seeded.get(name) {
                    Some(pk) => Some(*pk),
                    None => {
                        warn!(
                            "Parent '{}' of category '{}' is not defined earlier; adding it at top level.",
                            name, config.name
                        );
                        None
                    }
                },
            };
            let mut category = Category::new(&config.name, parent)?;
            let pk = self.categories.add(&mut category).await?;
            seeded.insert(config.name.as_str(), pk);
        }
        info!("Seeded {} default categories.", seeded.len());
        Ok(())
    }

    /// Recomputes budget spending as of today.
    pub async fn refresh(&self) -> Result<SpendingRefreshResult> {
        self.refresh_as_of(Local::now().date_naive()).await
    }

    /// Recomputes budget spending as of `anchor`.
    pub async fn refresh_as_of(&self, anchor: NaiveDate) -> Result<SpendingRefreshResult> {
        refresh_budget_spent(&self.expenses, &self.budgets, anchor).await
    }

    /// Refreshes spending as of today and returns the budget table.
    pub async fn budget_view(&self) -> Result<Vec<BudgetRow>> {
        self.budget_view_as_of(Local::now().date_naive()).await
    }

    /// Refreshes spending as of `anchor` and returns the budget table, in
    /// day, week, month order.
    pub async fn budget_view_as_of(&self, anchor: NaiveDate) -> Result<Vec<BudgetRow>> {
        self.refresh_as_of(anchor).await?;
        let mut budgets = self.budgets.get_all(&Filter::new()).await?;
        budgets.sort_by_key(|budget| budget.period);
        Ok(budgets.into_iter().map(BudgetRow::from).collect())
    }

    /// Expense table, newest purchase date first.
    pub async fn expense_view(&self) -> Result<Vec<ExpenseRow>> {
        let names: HashMap<i64, String> = self
            .categories
            .get_all(&Filter::new())
            .await?
            .into_iter()
            .map(|category| (category.pk, category.name))
            .collect();

        let mut rows: Vec<ExpenseRow> = self
            .expenses
            .get_all(&Filter::new())
            .await?
            .into_iter()
            .map(|expense| ExpenseRow {
                pk: expense.pk,
                expense_date: expense.expense_date,
                amount: expense.amount,
                category_name: names.get(&expense.category).cloned(),
                comment: expense.comment,
            })
            .collect();
        rows.sort_by(|a, b| b.expense_date.cmp(&a.expense_date));
        Ok(rows)
    }

    /// Category table.
    pub async fn category_view(&self) -> Result<Vec<CategoryRow>> {
        Ok(self
            .categories
            .get_all(&Filter::new())
            .await?
            .into_iter()
            .map(|category| CategoryRow {
                pk: category.pk,
                name: category.name,
            })
            .collect())
    }

    /// Sets the spending limit of budget row `pk`.
    #[instrument(skip(self))]
    pub async fn update_budget_limit(&self, pk: i64, limit: f64) -> Result<()> {
        validate_amount(limit)?;
        let mut budget = self.budgets.get(pk).await?.ok_or_else(|| Error::NotFound {
            entity: "Budget",
            identifier: pk.to_string(),
        })?;
        budget.limit = limit;
        self.budgets.update(&budget).await
    }

    /// Adds a category. A given parent must exist.
    #[instrument(skip(self))]
    pub async fn add_category(&self, name: &str, parent: Option<i64>) -> Result<i64> {
        if let Some(parent) = parent {
            if self.categories.get(parent).await?.is_none() {
                return Err(Error::NotFound {
                    entity: "Category",
                    identifier: parent.to_string(),
                });
            }
        }
        let mut category = Category::new(name, parent)?;
        self.categories.add(&mut category).await
    }

    /// Deletes a category. Expenses filed under it keep their reference.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, pk: i64) -> Result<()> {
        self.categories.delete(pk).await
    }

    async fn resolve_category(&self, name: &str) -> Result<i64> {
        let name = name.trim();
        find_category_by_name(&self.categories, name)
            .await?
            .map(|category| category.pk)
            .ok_or_else(|| Error::NotFound {
                entity: "Category",
                identifier: name.to_string(),
            })
    }

    /// Records a new expense.
    #[instrument(skip(self))]
    pub async fn add_expense(&self, input: ExpenseInput) -> Result<i64> {
        let category = self.resolve_category(&input.category).await?;
        let mut expense = Expense::new(input.amount, category, input.expense_date)?
            .with_comment(input.comment.as_deref())?;
        self.expenses.add(&mut expense).await
    }

    /// Replaces the editable fields of expense `pk`; `added_date` is kept.
    #[instrument(skip(self))]
    pub async fn update_expense(&self, pk: i64, input: ExpenseInput) -> Result<()> {
        validate_amount(input.amount)?;
        let category = self.resolve_category(&input.category).await?;
        let mut expense = self.expenses.get(pk).await?.ok_or_else(|| Error::NotFound {
            entity: "Expense",
            identifier: pk.to_string(),
        })?;
        expense.amount = input.amount;
        expense.category = category;
        expense.comment = normalize_comment(input.comment.as_deref())?;
        expense.expense_date = input.expense_date;
        self.expenses.update(&expense).await
    }

    /// Deletes every listed expense; unknown keys are ignored.
    #[instrument(skip(self))]
    pub async fn delete_expenses(&self, pks: &[i64]) -> Result<()> {
        for pk in pks {
            self.expenses.delete(*pk).await?;
        }
        Ok(())
    }
}
