//! Expense categories. A category may sit under a parent category.

use crate::db::{FieldKind, FieldValue, Record};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Longest accepted category name, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// A user-defined expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Primary key, `0` until stored
    pub pk: i64,
    /// Display name
    pub name: String,
    /// Key of the parent category, `None` for top-level categories
    pub parent: Option<i64>,
}

impl Category {
    /// Creates an unsaved category, trimming and validating the name.
    pub fn new(name: &str, parent: Option<i64>) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Category name cannot be empty".to_string(),
            });
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(Error::Validation {
                message: format!("Category name '{name}' exceeds {MAX_NAME_LEN} characters"),
            });
        }

        Ok(Self {
            pk: 0,
            name: name.to_string(),
            parent,
        })
    }
}

/// Attributes of [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    /// `pk`
    Pk,
    /// `name`
    Name,
    /// `parent`
    Parent,
}

impl Record for Category {
    type Field = CategoryField;

    const NAME: &'static str = "Category";

    fn pk(&self) -> i64 {
        self.pk
    }

    fn set_pk(&mut self, pk: i64) {
        self.pk = pk;
    }

    fn field_value(&self, field: CategoryField) -> FieldValue {
        match field {
            CategoryField::Pk => self.pk.into(),
            CategoryField::Name => self.name.as_str().into(),
            CategoryField::Parent => self.parent.into(),
        }
    }

    fn field_kind(field: CategoryField) -> FieldKind {
        match field {
            CategoryField::Pk | CategoryField::Parent => FieldKind::Integer,
            CategoryField::Name => FieldKind::Text,
        }
    }
}
