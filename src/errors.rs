//! Unified error types for the bookkeeper core.
//!
//! Contract misuse, failed lookups and storage failures are kept apart so the
//! presentation layer can decide which ones to report and which to retry.

use thiserror::Error;

/// Errors returned by records, repositories and services.
#[derive(Debug, Error)]
pub enum Error {
    /// A call that violates the repository contract or a record invariant
    /// (adding a record that already has a key, updating one that has none,
    /// an unknown budget period label).
    #[error("Invalid state: {message}")]
    InvalidState {
        /// What was wrong
        message: String,
    },

    /// A lookup that the caller required to succeed found nothing.
    #[error("{entity} not found: {identifier}")]
    NotFound {
        /// Record type that was looked up
        entity: &'static str,
        /// Key or name used for the lookup
        identifier: String,
    },

    /// Money amounts must be finite and non-negative.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Field-level validation failure (empty names, oversized comments).
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong
        message: String,
    },

    /// The backend returned data it could not map back into a record.
    #[error("Storage error: {message}")]
    Storage {
        /// What went wrong
        message: String,
    },

    /// Errors raised by the database driver.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Filesystem errors while preparing the storage file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for backend failures: I/O, driver errors and undecodable rows.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Database(_) | Self::Io(_))
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub(crate) fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_classification() {
        assert!(Error::storage("bad row").is_storage());
        assert!(Error::Database(sea_orm::DbErr::Custom("boom".to_string())).is_storage());
        assert!(!Error::invalid_state("pk already set").is_storage());
        assert!(
            !Error::NotFound {
                entity: "Category",
                identifier: "Food".to_string()
            }
            .is_storage()
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::NotFound {
            entity: "Category",
            identifier: "Food".to_string(),
        };
        assert_eq!(err.to_string(), "Category not found: Food");
    }
}
