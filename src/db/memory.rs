//! In-memory repository backend.
//!
//! Keeps records in an ordered map keyed by primary key. Filtering goes through
//! the record's field table, so any field can be matched.

use super::repository::{ensure_saved, ensure_unsaved};
use super::{Filter, Record, Repository};
use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

#[derive(Debug)]
struct Table<R> {
    rows: BTreeMap<i64, R>,
    last_pk: i64,
}

/// Repository holding its rows in process memory.
#[derive(Debug)]
pub struct MemoryRepository<R> {
    table: Mutex<Table<R>>,
}

impl<R: Record> MemoryRepository<R> {
    /// Creates an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                last_pk: 0,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table<R>>> {
        self.table
            .lock()
            .map_err(|_| Error::storage(format!("Failed to acquire lock on {} table", R::NAME)))
    }
}

impl<R: Record> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Repository<R> for MemoryRepository<R> {
    #[instrument(skip(self), fields(entity = R::NAME))]
    async fn add(&self, record: &mut R) -> Result<i64> {
        ensure_unsaved(record)?;
        let mut table = self.lock()?;
        table.last_pk += 1;
        let pk = table.last_pk;
        record.set_pk(pk);
        table.rows.insert(pk, record.clone());
        debug!("Stored {} with pk {}", R::NAME, pk);
        Ok(pk)
    }

    async fn get(&self, pk: i64) -> Result<Option<R>> {
        Ok(self.lock()?.rows.get(&pk).cloned())
    }

    #[instrument(skip(self), fields(entity = R::NAME))]
    async fn update(&self, record: &R) -> Result<()> {
        ensure_saved(record)?;
        let mut table = self.lock()?;
        let Some(row) = table.rows.get_mut(&record.pk()) else {
            return Err(Error::NotFound {
                entity: R::NAME,
                identifier: record.pk().to_string(),
            });
        };
        *row = record.clone();
        Ok(())
    }

    async fn get_all(&self, filter: &Filter<R>) -> Result<Vec<R>> {
        filter.validate()?;
        Ok(self
            .lock()?
            .rows
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn delete(&self, pk: i64) -> Result<()> {
        self.lock()?.rows.remove(&pk);
        Ok(())
    }
}
