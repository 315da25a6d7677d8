//! SQLite repository backend built on SeaORM.
//!
//! [`StoredRecord`] is the per-type mapping between a record and its entity:
//! a column for every field plus encode/decode of whole rows. Everything
//! type-specific lives in those impls; [`SqliteRepository`] is generic.

use super::format::{decode_date, decode_timestamp, encode_date, encode_timestamp};
use super::repository::{ensure_saved, ensure_unsaved};
use super::{FieldValue, Filter, Record, Repository};
use crate::entities::{budget, category, expense};
use crate::errors::{Error, Result};
use crate::models::{Budget, BudgetField, Category, CategoryField, Expense, ExpenseField};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, Condition,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PrimaryKeyTrait, QueryFilter,
    QueryOrder, Value,
};
use std::marker::PhantomData;
use tracing::{debug, instrument};

type ModelOf<R> = <<R as StoredRecord>::Entity as EntityTrait>::Model;
type ActiveModelOf<R> = <<R as StoredRecord>::Entity as EntityTrait>::ActiveModel;
type ColumnOf<R> = <<R as StoredRecord>::Entity as EntityTrait>::Column;

/// Mapping between a record type and the table that stores it.
pub trait StoredRecord: Record + Sized {
    /// Entity backing this record type.
    type Entity: EntityTrait;

    /// Column holding `field`.
    fn column(field: Self::Field) -> ColumnOf<Self>;

    /// Column holding the primary key.
    fn pk_column() -> ColumnOf<Self>;

    /// Row values for every field. The key is left unset for unsaved records.
    fn to_active_model(&self) -> ActiveModelOf<Self>;

    /// Decodes a stored row.
    fn from_model(model: ModelOf<Self>) -> Result<Self>;
}

fn pk_value(pk: i64) -> ActiveValue<i64> {
    if pk == 0 { NotSet } else { Unchanged(pk) }
}

/// `None` means the condition is an `IS NULL` test.
fn to_sql_value(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::Integer(v) => Some((*v).into()),
        FieldValue::Real(v) => Some((*v).into()),
        FieldValue::Text(v) => Some(v.clone().into()),
        FieldValue::Date(v) => Some(encode_date(*v).into()),
        FieldValue::Timestamp(v) => Some(encode_timestamp(*v).into()),
        FieldValue::Null => None,
    }
}

impl StoredRecord for Category {
    type Entity = category::Entity;

    fn column(field: CategoryField) -> category::Column {
        match field {
            CategoryField::Pk => category::Column::Id,
            CategoryField::Name => category::Column::Name,
            CategoryField::Parent => category::Column::Parent,
        }
    }

    fn pk_column() -> category::Column {
        category::Column::Id
    }

    fn to_active_model(&self) -> category::ActiveModel {
        category::ActiveModel {
            id: pk_value(self.pk),
            name: Set(self.name.clone()),
            parent: Set(self.parent),
        }
    }

    fn from_model(model: category::Model) -> Result<Self> {
        Ok(Self {
            pk: model.id,
            name: model.name,
            parent: model.parent,
        })
    }
}

impl StoredRecord for Expense {
    type Entity = expense::Entity;

    fn column(field: ExpenseField) -> expense::Column {
        match field {
            ExpenseField::Pk => expense::Column::Id,
            ExpenseField::Amount => expense::Column::Amount,
            ExpenseField::Category => expense::Column::Category,
            ExpenseField::Comment => expense::Column::Comment,
            ExpenseField::AddedDate => expense::Column::AddedDate,
            ExpenseField::ExpenseDate => expense::Column::ExpenseDate,
        }
    }

    fn pk_column() -> expense::Column {
        expense::Column::Id
    }

    fn to_active_model(&self) -> expense::ActiveModel {
        expense::ActiveModel {
            id: pk_value(self.pk),
            amount: Set(self.amount),
            category: Set(self.category),
            comment: Set(self.comment.clone()),
            added_date: Set(encode_timestamp(self.added_date)),
            expense_date: Set(encode_date(self.expense_date)),
        }
    }

    fn from_model(model: expense::Model) -> Result<Self> {
        Ok(Self {
            pk: model.id,
            amount: model.amount,
            category: model.category,
            comment: model.comment,
            added_date: decode_timestamp(&model.added_date)?,
            expense_date: decode_date(&model.expense_date)?,
        })
    }
}

impl StoredRecord for Budget {
    type Entity = budget::Entity;

    fn column(field: BudgetField) -> budget::Column {
        match field {
            BudgetField::Pk => budget::Column::Id,
            BudgetField::Period => budget::Column::Period,
            BudgetField::Limit => budget::Column::Limit,
            BudgetField::Spent => budget::Column::Spent,
        }
    }

    fn pk_column() -> budget::Column {
        budget::Column::Id
    }

    fn to_active_model(&self) -> budget::ActiveModel {
        budget::ActiveModel {
            id: pk_value(self.pk),
            period: Set(self.period.as_str().to_string()),
            limit: Set(self.limit),
            spent: Set(self.spent),
        }
    }

    fn from_model(model: budget::Model) -> Result<Self> {
        let period = model.period.parse().map_err(|_| {
            Error::storage(format!(
                "Budget row {} has unknown period '{}'",
                model.id, model.period
            ))
        })?;
        Ok(Self {
            pk: model.id,
            period,
            limit: model.limit,
            spent: model.spent,
        })
    }
}

/// Repository over one table of the SQLite storage file.
///
/// Holds its own handle to the shared connection; the handle is cheap to clone.
#[derive(Debug, Clone)]
pub struct SqliteRepository<R> {
    db: DatabaseConnection,
    _record: PhantomData<fn() -> R>,
}

impl<R: StoredRecord> SqliteRepository<R> {
    /// Binds a repository to an open connection whose tables already exist
    /// (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    fn condition(filter: &Filter<R>) -> Condition {
        filter
            .conditions()
            .fold(Condition::all(), |condition, (field, value)| {
                let column = R::column(*field);
                condition.add(match to_sql_value(value) {
                    Some(value) => column.eq(value),
                    None => column.is_null(),
                })
            })
    }
}

impl<R> Repository<R> for SqliteRepository<R>
where
    R: StoredRecord,
    ModelOf<R>: IntoActiveModel<ActiveModelOf<R>>,
    ActiveModelOf<R>: ActiveModelTrait<Entity = R::Entity> + ActiveModelBehavior + Send + Sync,
    <<R::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
{
    #[instrument(skip(self), fields(entity = R::NAME))]
    async fn add(&self, record: &mut R) -> Result<i64> {
        ensure_unsaved(record)?;
        let model = record.to_active_model().insert(&self.db).await?;
        let pk = R::from_model(model)?.pk();
        record.set_pk(pk);
        debug!("Inserted {} row {}", R::NAME, pk);
        Ok(pk)
    }

    #[instrument(skip(self), fields(entity = R::NAME))]
    async fn get(&self, pk: i64) -> Result<Option<R>> {
        R::Entity::find_by_id(pk)
            .one(&self.db)
            .await?
            .map(R::from_model)
            .transpose()
    }

    #[instrument(skip(self), fields(entity = R::NAME))]
    async fn update(&self, record: &R) -> Result<()> {
        ensure_saved(record)?;
        match record.to_active_model().update(&self.db).await {
            Ok(_) => {
                debug!("Updated {} row {}", R::NAME, record.pk());
                Ok(())
            }
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Err(Error::NotFound {
                entity: R::NAME,
                identifier: record.pk().to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(entity = R::NAME))]
    async fn get_all(&self, filter: &Filter<R>) -> Result<Vec<R>> {
        filter.validate()?;
        let models = R::Entity::find()
            .filter(Self::condition(filter))
            .order_by_asc(R::pk_column())
            .all(&self.db)
            .await?;
        debug!("Fetched {} {} rows", models.len(), R::NAME);
        models.into_iter().map(R::from_model).collect()
    }

    #[instrument(skip(self), fields(entity = R::NAME))]
    async fn delete(&self, pk: i64) -> Result<()> {
        let result = R::Entity::delete_by_id(pk).exec(&self.db).await?;
        debug!("Deleted {} {} rows", result.rows_affected, R::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    use super::*;
    use crate::db::MemoryRepository;
    use crate::models::Period;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_expense_crud() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let repo = SqliteRepository::<Expense>::new(db);

        let mut stored = Vec::new();
        for i in 1..=5_i64 {
            let mut expense = Expense::new(i as f64 * 1.5, i, date(2024, 3, i as u32))?
                .with_comment(Some("abc"))?;
            let pk = repo.add(&mut expense).await?;
            assert_eq!(expense.pk, pk);
            stored.push(expense);
        }

        for expense in &stored {
            assert_eq!(repo.get(expense.pk).await?.as_ref(), Some(expense));
        }

        let mut changed = Expense::new(1000.0, 101, date(2023, 12, 31))?
            .with_comment(Some("changed"))?;
        changed.pk = stored[0].pk;
        repo.update(&changed).await?;
        assert_eq!(repo.get(changed.pk).await?, Some(changed));

        let mut pks: Vec<i64> = stored.iter().map(|e| e.pk).collect();
        pks.extend([345, 34589, 123]);
        for pk in &pks {
            repo.delete(*pk).await?;
        }
        for pk in &pks {
            assert_eq!(repo.get(*pk).await?, None);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_budget_crud() -> Result<()> {
        let db = setup_test_db().await?;
        let repo = SqliteRepository::<Budget>::new(db);

        let mut pks = Vec::new();
        for (i, period) in Period::ALL.into_iter().enumerate() {
            let mut budget = Budget::new(period, 10.0 * (i as f64 + 1.0));
            budget.spent = 3.0;
            pks.push(repo.add(&mut budget).await?);
            assert_eq!(repo.get(budget.pk).await?, Some(budget));
        }

        let mut changed = Budget::new(Period::Month, 0.0);
        changed.pk = pks[0];
        repo.update(&changed).await?;
        assert_eq!(repo.get(pks[0]).await?, Some(changed));

        let weekly = repo
            .get_all(&Filter::new().eq(BudgetField::Period, Period::Week))
            .await?;
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].limit, 20.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_category_parent_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let repo = SqliteRepository::<Category>::new(db);

        let mut root = Category::new("Food", None)?;
        repo.add(&mut root).await?;
        let mut child = Category::new("Fruit", Some(root.pk))?;
        repo.add(&mut child).await?;

        let fetched_root = repo.get(root.pk).await?.unwrap();
        assert_eq!(fetched_root.parent, None);
        assert_eq!(fetched_root, root);
        assert_eq!(repo.get(child.pk).await?.unwrap().parent, Some(root.pk));

        let top_level = repo
            .get_all(&Filter::new().eq(CategoryField::Parent, None::<i64>))
            .await?;
        assert_eq!(top_level, vec![root.clone()]);

        let children = repo
            .get_all(&Filter::new().eq(CategoryField::Parent, Some(root.pk)))
            .await?;
        assert_eq!(children, vec![child]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_with_pk_fails_without_writing() -> Result<()> {
        let db = setup_test_db().await?;
        let repo = SqliteRepository::<Category>::new(db);

        let mut category = Category::new("Food", None)?;
        category.pk = 1;
        assert!(matches!(
            repo.add(&mut category).await,
            Err(Error::InvalidState { .. })
        ));
        assert_eq!(category.pk, 1);
        assert!(repo.get_all(&Filter::new()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_guards() -> Result<()> {
        let db = setup_test_db().await?;
        let repo = SqliteRepository::<Category>::new(db);

        let unsaved = Category::new("Food", None)?;
        assert!(matches!(
            repo.update(&unsaved).await,
            Err(Error::InvalidState { .. })
        ));

        let mut missing = Category::new("Ghost", None)?;
        missing.pk = 42;
        assert!(matches!(
            repo.update(&missing).await,
            Err(Error::NotFound {
                entity: "Category",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_filter_is_subset_of_all() -> Result<()> {
        let db = setup_test_db().await?;
        let repo = SqliteRepository::<Expense>::new(db);

        for i in 0..5 {
            let mut expense = Expense::new(f64::from(i + 1), 10, date(2024, 3, 5))?
                .with_comment(Some(i.to_string().as_str()))?;
            repo.add(&mut expense).await?;
        }
        let mut elsewhere = Expense::new(1.0, 11, date(2024, 3, 6))?;
        repo.add(&mut elsewhere).await?;

        let all = repo.get_all(&Filter::new()).await?;
        assert_eq!(all.len(), 6);

        let filters = [
            Filter::<Expense>::new().eq(ExpenseField::Category, 10_i64),
            Filter::new()
                .eq(ExpenseField::Comment, "0")
                .eq(ExpenseField::Category, 10_i64),
            Filter::new().eq(ExpenseField::ExpenseDate, date(2024, 3, 6)),
            Filter::new().eq(ExpenseField::Comment, None::<String>),
            Filter::new()
                .eq(ExpenseField::Amount, 3.0)
                .eq(ExpenseField::ExpenseDate, date(2024, 3, 5)),
            Filter::new()
                .eq(ExpenseField::Category, 10_i64)
                .eq(ExpenseField::Category, 11_i64),
        ];
        for filter in filters {
            let expected: Vec<Expense> =
                all.iter().filter(|e| filter.matches(*e)).cloned().collect();
            assert_eq!(repo.get_all(&filter).await?, expected, "{filter:?}");
        }

        let first = repo
            .get_all(
                &Filter::new()
                    .eq(ExpenseField::Comment, "0")
                    .eq(ExpenseField::Category, 10_i64),
            )
            .await?;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].amount, 1.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_subsecond_added_date_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let repo = SqliteRepository::<Expense>::new(db);

        let mut expense = Expense::new(4.25, 1, date(2024, 3, 5))?;
        expense.added_date = date(2024, 3, 5)
            .and_hms_nano_opt(3, 52, 15, 707_915_823)
            .unwrap();
        repo.add(&mut expense).await?;

        let fetched = repo.get(expense.pk).await?.unwrap();
        assert_eq!(fetched.added_date, expense.added_date);
        assert_eq!(fetched, expense);
        assert_eq!(
            repo.get_all(&Filter::new().eq(ExpenseField::AddedDate, expense.added_date))
                .await?,
            vec![expense]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_mismatched_filter_kind_rejected_by_both_backends() -> Result<()> {
        let db = setup_test_db().await?;
        let sqlite = SqliteRepository::<Category>::new(db);
        let memory = MemoryRepository::<Category>::new();
        let mut in_sqlite = Category::new("Food", None)?;
        sqlite.add(&mut in_sqlite).await?;
        let mut in_memory = Category::new("Food", None)?;
        memory.add(&mut in_memory).await?;

        let by_text_key = Filter::<Category>::new().eq(CategoryField::Pk, "1");
        assert!(matches!(
            sqlite.get_all(&by_text_key).await,
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            memory.get_all(&by_text_key).await,
            Err(Error::Validation { .. })
        ));

        let by_key = Filter::<Category>::new().eq(CategoryField::Pk, 1_i64);
        assert_eq!(sqlite.get_all(&by_key).await?, memory.get_all(&by_key).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_period_is_storage_error() -> Result<()> {
        let db = setup_test_db().await?;
        budget::ActiveModel {
            period: Set("fortnight".to_string()),
            limit: Set(0.0),
            spent: Set(0.0),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let repo = SqliteRepository::<Budget>::new(db);
        let err = repo.get_all(&Filter::new()).await.unwrap_err();
        assert!(err.is_storage());
        Ok(())
    }
}
