use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};

use crate::{
    EngineError, Entry, EntryFilter, EntryRepository, EntryStatus, EntryType, ResultEngine, entry,
    entry::parse_decimal, util::today,
};

use super::with_tx;

/// [`EntryRepository`] backed by the `entries` table.
///
/// Values are kept as decimal text and summed with [`Decimal`], so storage
/// never rounds through floating point.
#[derive(Clone, Debug)]
pub struct SeaOrmEntryRepository {
    database: DatabaseConnection,
}

impl SeaOrmEntryRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    async fn values(
        &self,
        user_id: Uuid,
        kind: EntryType,
        status: Option<EntryStatus>,
    ) -> ResultEngine<Option<Decimal>> {
        let mut query = entry::Entity::find()
            .select_only()
            .column(entry::Column::Value)
            .filter(entry::Column::UserId.eq(user_id.to_string()))
            .filter(entry::Column::Kind.eq(kind.as_str()));
        if let Some(status) = status {
            query = query.filter(entry::Column::Status.eq(status.as_str()));
        }

        let values: Vec<String> = query.into_tuple().all(&self.database).await?;
        values
            .iter()
            .try_fold(None, |sum: Option<Decimal>, value| -> ResultEngine<_> {
                sum.unwrap_or_default()
                    .checked_add(parse_decimal(value)?)
                    .map(Some)
                    .ok_or_else(|| EngineError::InvalidValue("balance overflow".to_string()))
            })
    }
}

#[async_trait]
impl EntryRepository for SeaOrmEntryRepository {
    async fn save(&self, record: Entry) -> ResultEngine<Entry> {
        let mut record = record;
        let id = *record.id.get_or_insert_with(Uuid::new_v4);

        with_tx!(self, |db_tx| {
            let existing = entry::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;

            match existing {
                Some(stored) => {
                    record.registered_at = record.registered_at.or(Some(stored.registered_at));
                    entry::ActiveModel::try_from(&record)?
                        .update(&db_tx)
                        .await?;
                }
                None => {
                    record.registered_at = record.registered_at.or_else(|| Some(today()));
                    entry::ActiveModel::try_from(&record)?
                        .insert(&db_tx)
                        .await?;
                }
            }

            Ok(record)
        })
    }

    async fn delete(&self, record: &Entry) -> ResultEngine<()> {
        let id = record
            .id
            .ok_or_else(|| EngineError::KeyNotFound("entry".to_string()))?;
        entry::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<Entry>> {
        entry::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Entry::try_from)
            .transpose()
    }

    async fn find_matching(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>> {
        // Equality constraints narrow the rows in SQL, the description is
        // matched by the filter itself so case folding is not left to SQLite.
        let mut query = entry::Entity::find();
        if let Some(month) = filter.month {
            query = query.filter(entry::Column::Month.eq(month));
        }
        if let Some(year) = filter.year {
            query = query.filter(entry::Column::Year.eq(year));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(entry::Column::UserId.eq(user_id.to_string()));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(entry::Column::Kind.eq(kind.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(entry::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_asc(entry::Column::Year)
            .order_by_asc(entry::Column::Month)
            .order_by_asc(entry::Column::Description)
            .all(&self.database)
            .await?;

        let mut entries = Vec::with_capacity(models.len());
        for model in models {
            let record = Entry::try_from(model)?;
            if filter.matches(&record) {
                entries.push(record);
            }
        }
        Ok(entries)
    }

    async fn sum_by_type_and_user(
        &self,
        user_id: Uuid,
        kind: EntryType,
    ) -> ResultEngine<Option<Decimal>> {
        self.values(user_id, kind, None).await
    }

    async fn sum_by_type_and_user_and_status(
        &self,
        user_id: Uuid,
        kind: EntryType,
        status: EntryStatus,
    ) -> ResultEngine<Option<Decimal>> {
        self.values(user_id, kind, Some(status)).await
    }
}
