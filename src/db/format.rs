//! Text encoding of dates at the storage boundary.
//!
//! Records carry `chrono` values; only the stored rows hold strings, and only
//! in these formats.

use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Stored format of calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Stored format of timestamps. The fraction is omitted for whole seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
/// Timestamps written before fractions were stored.
const WHOLE_SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a date for storage.
#[must_use]
pub fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a stored date.
pub fn decode_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| Error::storage(format!("Failed to parse stored date '{value}': {e}")))
}

/// Formats a timestamp for storage without losing precision.
#[must_use]
pub fn encode_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp.
pub fn decode_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, WHOLE_SECOND_FORMAT))
        .map_err(|e| Error::storage(format!("Failed to parse stored timestamp '{value}': {e}")))
}
