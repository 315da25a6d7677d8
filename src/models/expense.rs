//! Expense records.

use crate::db::{FieldKind, FieldValue, Record};
use crate::errors::{Error, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// Longest accepted comment, in characters.
pub const MAX_COMMENT_LEN: usize = 50;

/// A single purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Primary key, `0` until stored
    pub pk: i64,
    /// Amount spent, never negative
    pub amount: f64,
    /// Key of the category this expense is filed under
    pub category: i64,
    /// Free-form note
    pub comment: Option<String>,
    /// When the record was created
    pub added_date: NaiveDateTime,
    /// Calendar day the purchase happened
    pub expense_date: NaiveDate,
}

impl Expense {
    /// Creates an unsaved expense stamped with the current local time.
    pub fn new(amount: f64, category: i64, expense_date: NaiveDate) -> Result<Self> {
        validate_amount(amount)?;
        Ok(Self {
            pk: 0,
            amount,
            category,
            comment: None,
            added_date: Local::now().naive_local().trunc_subsecs(0),
            expense_date,
        })
    }

    /// Attaches a comment; blank comments are stored as `None`.
    pub fn with_comment(mut self, comment: Option<&str>) -> Result<Self> {
        self.comment = normalize_comment(comment)?;
        Ok(self)
    }
}

/// Rejects negative, NaN and infinite amounts.
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

pub(crate) fn normalize_comment(comment: Option<&str>) -> Result<Option<String>> {
    let Some(comment) = comment.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    if comment.chars().count() > MAX_COMMENT_LEN {
        return Err(Error::Validation {
            message: format!("Comment exceeds {MAX_COMMENT_LEN} characters"),
        });
    }
    Ok(Some(comment.to_string()))
}

/// Attributes of [`Expense`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    /// `pk`
    Pk,
    /// `amount`
    Amount,
    /// `category`
    Category,
    /// `comment`
    Comment,
    /// `added_date`
    AddedDate,
    /// `expense_date`
    ExpenseDate,
}

impl Record for Expense {
    type Field = ExpenseField;

    const NAME: &'static str = "Expense";

    fn pk(&self) -> i64 {
        self.pk
    }

    fn set_pk(&mut self, pk: i64) {
        self.pk = pk;
    }

    fn field_value(&self, field: ExpenseField) -> FieldValue {
        match field {
            ExpenseField::Pk => self.pk.into(),
            ExpenseField::Amount => self.amount.into(),
            ExpenseField::Category => self.category.into(),
            ExpenseField::Comment => self.comment.clone().into(),
            ExpenseField::AddedDate => self.added_date.into(),
            ExpenseField::ExpenseDate => self.expense_date.into(),
        }
    }

    fn field_kind(field: ExpenseField) -> FieldKind {
        match field {
            ExpenseField::Pk | ExpenseField::Category => FieldKind::Integer,
            ExpenseField::Amount => FieldKind::Real,
            ExpenseField::Comment => FieldKind::Text,
            ExpenseField::AddedDate => FieldKind::Timestamp,
            ExpenseField::ExpenseDate => FieldKind::Date,
        }
    }
}
