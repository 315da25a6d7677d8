//! Record abstraction shared by every storage backend.
//!
//! Each record type lists its attributes in a `Field` enum and exposes them as
//! [`FieldValue`]s. Backends use that table for filtering instead of inspecting
//! the record type at runtime.

use crate::errors::{Error, Result};
use crate::models::Period;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// A single attribute value, independent of how a backend stores it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Integer keys and references
    Integer(i64),
    /// Money amounts
    Real(f64),
    /// Names, comments and labels
    Text(String),
    /// Calendar dates
    Date(NaiveDate),
    /// Local timestamps
    Timestamp(NaiveDateTime),
    /// An absent optional value
    Null,
}

impl FieldValue {
    /// Kind of a present value, `None` for [`FieldValue::Null`].
    #[must_use]
    pub const fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Integer(_) => Some(FieldKind::Integer),
            Self::Real(_) => Some(FieldKind::Real),
            Self::Text(_) => Some(FieldKind::Text),
            Self::Date(_) => Some(FieldKind::Date),
            Self::Timestamp(_) => Some(FieldKind::Timestamp),
            Self::Null => None,
        }
    }
}

/// Value kind a field holds when it is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// [`FieldValue::Integer`]
    Integer,
    /// [`FieldValue::Real`]
    Real,
    /// [`FieldValue::Text`]
    Text,
    /// [`FieldValue::Date`]
    Date,
    /// [`FieldValue::Timestamp`]
    Timestamp,
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Period> for FieldValue {
    fn from(value: Period) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A plain data value that a repository can persist.
///
/// `pk == 0` means the record has not been stored yet.
pub trait Record: Clone + fmt::Debug {
    /// Names every attribute of the record, including its key.
    type Field: Copy + Eq + fmt::Debug;

    /// Record type name used in errors and logs.
    const NAME: &'static str;

    /// Primary key, `0` when unassigned.
    fn pk(&self) -> i64;

    /// Stores the key assigned by a backend.
    fn set_pk(&mut self, pk: i64);

    /// Current value of one attribute.
    fn field_value(&self, field: Self::Field) -> FieldValue;

    /// Kind of value stored in `field`.
    fn field_kind(field: Self::Field) -> FieldKind;
}

/// Exact-match conditions over record fields, combined with AND.
///
/// An empty filter matches every record.
#[derive(Debug, Clone)]
pub struct Filter<R: Record> {
    conditions: Vec<(R::Field, FieldValue)>,
}

impl<R: Record> Filter<R> {
    /// A filter with no conditions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Adds the condition `field == value`.
    #[must_use]
    pub fn eq(mut self, field: R::Field, value: impl Into<FieldValue>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    /// True when no condition has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Conditions in the order they were added.
    pub fn conditions(&self) -> impl Iterator<Item = &(R::Field, FieldValue)> {
        self.conditions.iter()
    }

    /// Rejects conditions whose value kind differs from the field's.
    ///
    /// `Null` is accepted for any field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in &self.conditions {
            let expected = R::field_kind(*field);
            if let Some(kind) = value.kind()
                && kind != expected
            {
                return Err(Error::Validation {
                    message: format!(
                        "{} filter on {field:?} expects {expected:?}, got {kind:?}",
                        R::NAME
                    ),
                });
            }
        }
        Ok(())
    }

    /// Whether `record` satisfies every condition.
    #[must_use]
    pub fn matches(&self, record: &R) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| record.field_value(*field) == *value)
    }
}

impl<R: Record> Default for Filter<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{Category, CategoryField, Expense, ExpenseField};

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(4_i64)), FieldValue::Integer(4));
        assert_eq!(
            FieldValue::from(Period::Week),
            FieldValue::Text("week".to_string())
        );
    }

    #[test]
    fn test_filter_matches_all_conditions() {
        let category = Category::new("Snacks", Some(3)).unwrap();

        assert!(Filter::<Category>::new().matches(&category));
        assert!(
            Filter::new()
                .eq(CategoryField::Name, "Snacks")
                .matches(&category)
        );
        assert!(
            Filter::new()
                .eq(CategoryField::Name, "Snacks")
                .eq(CategoryField::Parent, Some(3_i64))
                .matches(&category)
        );
        assert!(
            !Filter::new()
                .eq(CategoryField::Name, "Snacks")
                .eq(CategoryField::Parent, None::<i64>)
                .matches(&category)
        );
    }

    #[test]
    fn test_validate_rejects_mismatched_kinds() {
        assert!(
            Filter::<Category>::new()
                .eq(CategoryField::Pk, 1_i64)
                .eq(CategoryField::Parent, None::<i64>)
                .validate()
                .is_ok()
        );
        assert!(matches!(
            Filter::<Category>::new().eq(CategoryField::Pk, "1").validate(),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            Filter::<Expense>::new()
                .eq(ExpenseField::Amount, 3_i64)
                .validate(),
            Err(Error::Validation { .. })
        ));
    }
}
