//! The persistence contract every storage backend implements.

use super::{Filter, Record};
use crate::errors::{Error, Result};

/// Create/read/update/delete plus filtered listing for one record type.
///
/// Each call is an independent operation; nothing is atomic across calls.
#[allow(async_fn_in_trait)]
pub trait Repository<R: Record> {
    /// Stores a new record, writes the assigned key into `record.pk` and returns it.
    ///
    /// Fails with [`Error::InvalidState`] if `record.pk` is already set; storage
    /// is left untouched in that case.
    async fn add(&self, record: &mut R) -> Result<i64>;

    /// Fetches a record by key, `None` if there is no such row.
    async fn get(&self, pk: i64) -> Result<Option<R>>;

    /// Overwrites every field of the stored row with the values in `record`.
    ///
    /// Fails with [`Error::InvalidState`] if `record.pk` is `0` and with
    /// [`Error::NotFound`] if no row has that key.
    async fn update(&self, record: &R) -> Result<()>;

    /// Lists every record matching all conditions of `filter`, by ascending key.
    async fn get_all(&self, filter: &Filter<R>) -> Result<Vec<R>>;

    /// Removes a record; deleting a missing key is a no-op.
    async fn delete(&self, pk: i64) -> Result<()>;
}

/// Guards `add`: the caller must not pre-assign a key.
pub(crate) fn ensure_unsaved<R: Record>(record: &R) -> Result<()> {
    if record.pk() != 0 {
        return Err(Error::invalid_state(format!(
            "trying to add {} with filled pk {}",
            R::NAME,
            record.pk()
        )));
    }
    Ok(())
}

/// Guards `update`: there must be a key to update.
pub(crate) fn ensure_saved<R: Record>(record: &R) -> Result<()> {
    if record.pk() == 0 {
        return Err(Error::invalid_state(format!(
            "attempt to update {} with unknown primary key",
            R::NAME
        )));
    }
    Ok(())
}
