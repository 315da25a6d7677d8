//! Periodic spending aggregation.
//!
//! Recomputes the `spent` column of every budget row from the full expense
//! history. Each refresh is a single O(n) pass over all expenses; rows are only
//! written when their sum changed. Keeping running sums updated on every
//! expense add/update/delete would avoid the rescan, at the cost of
//! maintaining them through every write path.

use crate::{
    db::{Filter, Repository},
    errors::{Error, Result},
    models::{Budget, BudgetField, Expense, Period},
};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Spending sums for the three periods around one anchor date.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    /// Expenses dated on the anchor day
    pub day: f64,
    /// Expenses dated in the anchor's Monday..Sunday week
    pub week: f64,
    /// Expenses dated in the anchor's calendar month
    pub month: f64,
}

impl PeriodTotals {
    /// Sum for one period.
    #[must_use]
    pub const fn get(&self, period: Period) -> f64 {
        match period {
            Period::Day => self.day,
            Period::Week => self.week,
            Period::Month => self.month,
        }
    }
}

/// Outcome of one spending refresh.
#[derive(Debug, Clone)]
pub struct SpendingRefreshResult {
    /// Anchor date the periods were computed around
    pub anchor: NaiveDate,
    /// Freshly computed sums
    pub totals: PeriodTotals,
    /// Periods whose stored `spent` value was rewritten
    pub updated_periods: Vec<Period>,
}

/// Buckets `expenses` into the day, week and month around `anchor`.
#[must_use]
pub fn compute_period_totals(expenses: &[Expense], anchor: NaiveDate) -> PeriodTotals {
    let (week_start, week_end) = Period::Week.bounds(anchor);
    let (month_start, month_end) = Period::Month.bounds(anchor);

    expenses
        .iter()
        .fold(PeriodTotals::default(), |mut totals, expense| {
            let date = expense.expense_date;
            if date == anchor {
                totals.day += expense.amount;
            }
            if week_start <= date && date <= week_end {
                totals.week += expense.amount;
            }
            if month_start <= date && date <= month_end {
                totals.month += expense.amount;
            }
            totals
        })
}

/// Fetches the single budget row for `period`.
pub async fn get_budget_for_period<B>(budgets: &B, period: Period) -> Result<Budget>
where
    B: Repository<Budget>,
{
    budgets
        .get_all(&Filter::new().eq(BudgetField::Period, period))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound {
            entity: "Budget",
            identifier: period.to_string(),
        })
}

/// Recomputes every budget's `spent` value as of `anchor` and stores the ones
/// that changed.
///
/// A failed write aborts the remaining periods; the next refresh recomputes
/// all three from scratch.
#[allow(clippy::float_cmp)]
#[instrument(skip(expenses, budgets))]
pub async fn refresh_budget_spent<E, B>(
    expenses: &E,
    budgets: &B,
    anchor: NaiveDate,
) -> Result<SpendingRefreshResult>
where
    E: Repository<Expense>,
    B: Repository<Budget>,
{
    let all_expenses = expenses.get_all(&Filter::new()).await?;
    let totals = compute_period_totals(&all_expenses, anchor);
    debug!(
        "Computed totals over {} expenses: {:?}",
        all_expenses.len(),
        totals
    );

    let mut updated_periods = Vec::new();
    for period in Period::ALL {
        let mut budget = get_budget_for_period(budgets, period).await?;
        let spent = totals.get(period);
        if budget.spent != spent {
            budget.spent = spent;
            budgets.update(&budget).await?;
            updated_periods.push(period);
        }
    }

    if !updated_periods.is_empty() {
        info!("Updated spent for periods {:?}", updated_periods);
    }

    Ok(SpendingRefreshResult {
        anchor,
        totals,
        updated_periods,
    })
}

/// Creates one budget row per period (`limit = 0`, `spent = 0`) if the budget
/// table is empty. Returns whether rows were created.
#[instrument(skip(budgets))]
pub async fn ensure_default_budgets<B>(budgets: &B) -> Result<bool>
where
    B: Repository<Budget>,
{
    if !budgets.get_all(&Filter::new()).await?.is_empty() {
        return Ok(false);
    }
    for period in Period::ALL {
        budgets.add(&mut Budget::new(period, 0.0)).await?;
    }
    info!("Created default budget rows.");
    Ok(true)
}
