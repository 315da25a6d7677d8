//! Budget rows: one spending limit per period.

use super::Period;
use crate::db::{FieldKind, FieldValue, Record};
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Spending limit and current spending for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Primary key, `0` until stored
    pub pk: i64,
    /// Which bucket this row covers
    pub period: Period,
    /// User-set ceiling
    pub limit: f64,
    /// Sum of expenses in the current period, maintained by the spending service
    pub spent: f64,
}

impl Budget {
    /// Creates an unsaved budget with nothing spent.
    #[must_use]
    pub const fn new(period: Period, limit: f64) -> Self {
        Self {
            pk: 0,
            period,
            limit,
            spent: 0.0,
        }
    }

    /// Creates an unsaved budget from a period label.
    ///
    /// Fails with [`crate::errors::Error::InvalidState`] unless the label is
    /// `"day"`, `"week"` or `"month"`.
    pub fn from_label(period: &str, limit: f64, spent: f64) -> Result<Self> {
        Ok(Self {
            pk: 0,
            period: period.parse()?,
            limit,
            spent,
        })
    }

    /// `limit - spent`; negative once the limit is exceeded.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }
}

/// Attributes of [`Budget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetField {
    /// `pk`
    Pk,
    /// `period`
    Period,
    /// `limit`
    Limit,
    /// `spent`
    Spent,
}

impl Record for Budget {
    type Field = BudgetField;

    const NAME: &'static str = "Budget";

    fn pk(&self) -> i64 {
        self.pk
    }

    fn set_pk(&mut self, pk: i64) {
        self.pk = pk;
    }

    fn field_value(&self, field: BudgetField) -> FieldValue {
        match field {
            BudgetField::Pk => self.pk.into(),
            BudgetField::Period => self.period.into(),
            BudgetField::Limit => self.limit.into(),
            BudgetField::Spent => self.spent.into(),
        }
    }

    fn field_kind(field: BudgetField) -> FieldKind {
        match field {
            BudgetField::Pk => FieldKind::Integer,
            BudgetField::Period => FieldKind::Text,
            BudgetField::Limit | BudgetField::Spent => FieldKind::Real,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_from_label_accepts_known_periods() {
        for label in ["day", "week", "month"] {
            let budget = Budget::from_label(label, 100.0, 20.0).unwrap();
            assert_eq!(budget.period.as_str(), label);
            assert_eq!(budget.limit, 100.0);
            assert_eq!(budget.spent, 20.0);
            assert_eq!(budget.pk, 0);
        }
    }

    #[test]
    fn test_from_label_rejects_unknown_period() {
        assert!(matches!(
            Budget::from_label("quarter", 2.0, 4.0),
            Err(Error::InvalidState { .. })
        ));
    }

    #[test]
    fn test_remaining() {
        let mut budget = Budget::new(Period::Day, 100.0);
        assert_eq!(budget.remaining(), 100.0);
        budget.spent = 130.0;
        assert_eq!(budget.remaining(), -30.0);
    }
}
