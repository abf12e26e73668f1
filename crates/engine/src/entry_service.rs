//! Entry lifecycle and balance computation.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    Entry, EntryFilter, EntryRepository, EntryStatus, EntryType, ResultEngine, validate,
};

/// Orchestrates entry writes and reads over an [`EntryRepository`].
///
/// Every write is validated first; nothing reaches storage otherwise.
#[derive(Clone)]
pub struct EntryService {
    repository: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(repository: Arc<dyn EntryRepository>) -> Self {
        Self { repository }
    }

    /// Validate and store a new entry. The stored entry is always `Pending`,
    /// whatever status the caller set.
    pub async fn create(&self, entry: Entry) -> ResultEngine<Entry> {
        let mut entry = entry;
        if let Err(err) = validate(&entry) {
            tracing::debug!("entry rejected: {err}");
            return Err(err);
        }
        entry.status = EntryStatus::Pending;
        let saved = self.repository.save(entry).await?;
        tracing::debug!("entry created: {saved}");
        Ok(saved)
    }

    /// Validate and store an existing entry, keeping its status.
    ///
    /// # Panics
    ///
    /// Panics if `entry` has no identity: only persisted entries can be
    /// updated.
    pub async fn update(&self, entry: Entry) -> ResultEngine<Entry> {
        assert!(
            entry.id.is_some(),
            "entry must have an identity to be updated"
        );
        if let Err(err) = validate(&entry) {
            tracing::debug!("entry update rejected: {err}");
            return Err(err);
        }
        self.repository.save(entry).await
    }

    /// Remove an entry permanently.
    ///
    /// # Panics
    ///
    /// Panics if `entry` has no identity.
    pub async fn delete(&self, entry: &Entry) -> ResultEngine<()> {
        assert!(
            entry.id.is_some(),
            "entry must have an identity to be deleted"
        );
        self.repository.delete(entry).await
    }

    /// Set the status and go through [`update`](Self::update), so the entry
    /// is fully validated again. Any transition is allowed.
    ///
    /// # Panics
    ///
    /// Panics if `entry` has no identity.
    pub async fn change_status(&self, entry: Entry, status: EntryStatus) -> ResultEngine<Entry> {
        let mut entry = entry;
        entry.status = status;
        self.update(entry).await
    }

    pub async fn search(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>> {
        self.repository.find_matching(filter).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<Entry>> {
        self.repository.find_by_id(id).await
    }

    /// Confirmed income minus confirmed expense of a user.
    pub async fn compute_balance(&self, user_id: Uuid) -> ResultEngine<Decimal> {
        let income = self
            .repository
            .sum_by_type_and_user_and_status(user_id, EntryType::Income, EntryStatus::Confirmed)
            .await?
            .unwrap_or_default();
        let expense = self
            .repository
            .sum_by_type_and_user_and_status(user_id, EntryType::Expense, EntryStatus::Confirmed)
            .await?
            .unwrap_or_default();
        Ok(income - expense)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{EngineError, validation};

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct MockEntryRepository {
        stored: Mutex<Vec<Entry>>,
        saved: Mutex<Vec<Entry>>,
        deleted: Mutex<Vec<Entry>>,
        filters: Mutex<Vec<EntryFilter>>,
    }

    impl MockEntryRepository {
        fn with_entries(entries: Vec<Entry>) -> Self {
            Self {
                stored: Mutex::new(entries),
                ..Default::default()
            }
        }

        fn saved(&self) -> Vec<Entry> {
            self.saved.lock().unwrap().clone()
        }

        fn deleted(&self) -> Vec<Entry> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EntryRepository for MockEntryRepository {
        async fn save(&self, entry: Entry) -> ResultEngine<Entry> {
            let mut entry = entry;
            entry.id.get_or_insert_with(Uuid::new_v4);
            self.saved.lock().unwrap().push(entry.clone());
            Ok(entry)
        }

        async fn delete(&self, entry: &Entry) -> ResultEngine<()> {
            self.deleted.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<Entry>> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .find(|entry| entry.id == Some(id))
                .cloned())
        }

        async fn find_matching(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>> {
            self.filters.lock().unwrap().push(filter.clone());
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| filter.matches(entry))
                .cloned()
                .collect())
        }

        async fn sum_by_type_and_user(
            &self,
            user_id: Uuid,
            kind: EntryType,
        ) -> ResultEngine<Option<Decimal>> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| entry.user_id == Some(user_id) && entry.kind == Some(kind))
                .filter_map(|entry| entry.value)
                .reduce(|a, b| a + b))
        }

        async fn sum_by_type_and_user_and_status(
            &self,
            user_id: Uuid,
            kind: EntryType,
            status: EntryStatus,
        ) -> ResultEngine<Option<Decimal>> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| {
                    entry.user_id == Some(user_id)
                        && entry.kind == Some(kind)
                        && entry.status == status
                })
                .filter_map(|entry| entry.value)
                .reduce(|a, b| a + b))
        }
    }

    fn some_entry(user_id: Uuid) -> Entry {
        Entry::new(
            "Lançamento qualquer",
            1,
            2022,
            dec!(10.00),
            EntryType::Income,
            user_id,
        )
    }

    fn stored_entry(
        user_id: Uuid,
        kind: EntryType,
        status: EntryStatus,
        value: Decimal,
    ) -> Entry {
        let mut entry = Entry::new("Lançamento", 1, 2022, value, kind, user_id);
        entry.id = Some(Uuid::new_v4());
        entry.status = status;
        entry
    }

    fn service(repository: &Arc<MockEntryRepository>) -> EntryService {
        EntryService::new(repository.clone())
    }

    #[tokio::test]
    async fn create_assigns_identity_and_pending_status() {
        let repository = Arc::new(MockEntryRepository::default());
        let mut entry = some_entry(Uuid::new_v4());
        entry.status = EntryStatus::Confirmed;

        let created = service(&repository).create(entry).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.status, EntryStatus::Pending);
        assert_eq!(repository.saved().len(), 1);
        assert_eq!(repository.saved()[0].status, EntryStatus::Pending);
    }

    #[tokio::test]
    async fn create_never_saves_an_invalid_entry() {
        let repository = Arc::new(MockEntryRepository::default());
        let mut entry = some_entry(Uuid::new_v4());
        entry.month = Some(13);

        let err = service(&repository).create(entry).await.unwrap_err();

        assert_eq!(
            err,
            EngineError::Validation(validation::INVALID_MONTH.to_string())
        );
        assert!(repository.saved().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_the_status() {
        let repository = Arc::new(MockEntryRepository::default());
        let mut entry = some_entry(Uuid::new_v4());
        entry.id = Some(Uuid::new_v4());
        entry.status = EntryStatus::Cancelled;

        let updated = service(&repository).update(entry.clone()).await.unwrap();

        assert_eq!(updated, entry);
        assert_eq!(repository.saved(), vec![entry]);
    }

    #[tokio::test]
    async fn update_validates_before_saving() {
        let repository = Arc::new(MockEntryRepository::default());
        let mut entry = some_entry(Uuid::new_v4());
        entry.id = Some(Uuid::new_v4());
        entry.value = Some(Decimal::ZERO);

        let err = service(&repository).update(entry).await.unwrap_err();

        assert_eq!(
            err,
            EngineError::Validation(validation::INVALID_VALUE.to_string())
        );
        assert!(repository.saved().is_empty());
    }

    #[tokio::test]
    async fn update_without_identity_panics_before_saving() {
        let repository = Arc::new(MockEntryRepository::default());
        let service = service(&repository);
        let entry = some_entry(Uuid::new_v4());

        let outcome = tokio::spawn(async move { service.update(entry).await }).await;

        assert!(outcome.unwrap_err().is_panic());
        assert!(repository.saved().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_a_persisted_entry() {
        let repository = Arc::new(MockEntryRepository::default());
        let mut entry = some_entry(Uuid::new_v4());
        entry.id = Some(Uuid::new_v4());

        service(&repository).delete(&entry).await.unwrap();

        assert_eq!(repository.deleted(), vec![entry]);
    }

    #[tokio::test]
    async fn delete_without_identity_panics_before_deleting() {
        let repository = Arc::new(MockEntryRepository::default());
        let service = service(&repository);
        let entry = some_entry(Uuid::new_v4());

        let outcome = tokio::spawn(async move { service.delete(&entry).await }).await;

        assert!(outcome.unwrap_err().is_panic());
        assert!(repository.deleted().is_empty());
    }

    #[tokio::test]
    async fn change_status_goes_through_update() {
        let repository = Arc::new(MockEntryRepository::default());
        let mut entry = some_entry(Uuid::new_v4());
        entry.id = Some(Uuid::new_v4());

        let changed = service(&repository)
            .change_status(entry, EntryStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(changed.status, EntryStatus::Confirmed);
        assert_eq!(repository.saved().len(), 1);
        assert_eq!(repository.saved()[0].status, EntryStatus::Confirmed);
    }

    #[tokio::test]
    async fn change_status_allows_any_transition() {
        let repository = Arc::new(MockEntryRepository::default());
        let service = service(&repository);
        let mut entry = some_entry(Uuid::new_v4());
        entry.id = Some(Uuid::new_v4());

        let confirmed = service
            .change_status(entry, EntryStatus::Confirmed)
            .await
            .unwrap();
        let cancelled = service
            .change_status(confirmed, EntryStatus::Cancelled)
            .await
            .unwrap();
        let pending = service
            .change_status(cancelled, EntryStatus::Pending)
            .await
            .unwrap();

        assert_eq!(pending.status, EntryStatus::Pending);
        assert_eq!(repository.saved().len(), 3);
    }

    #[tokio::test]
    async fn change_status_revalidates_the_entry() {
        let repository = Arc::new(MockEntryRepository::default());
        let mut entry = some_entry(Uuid::new_v4());
        entry.id = Some(Uuid::new_v4());
        entry.description = Some(" ".to_string());

        let err = service(&repository)
            .change_status(entry, EntryStatus::Confirmed)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::Validation(validation::INVALID_DESCRIPTION.to_string())
        );
        assert!(repository.saved().is_empty());
    }

    #[tokio::test]
    async fn search_delegates_the_filter() {
        let user_id = Uuid::new_v4();
        let mut salary = stored_entry(user_id, EntryType::Income, EntryStatus::Pending, dec!(10));
        salary.description = Some("Salário".to_string());
        let mut rent = stored_entry(user_id, EntryType::Expense, EntryStatus::Pending, dec!(5));
        rent.description = Some("Aluguel".to_string());
        let repository = Arc::new(MockEntryRepository::with_entries(vec![
            salary.clone(),
            rent,
        ]));

        let filter = EntryFilter::for_user(user_id).description("sal");
        let found = service(&repository).search(&filter).await.unwrap();

        assert_eq!(found, vec![salary]);
        assert_eq!(*repository.filters.lock().unwrap(), vec![filter]);
    }

    #[tokio::test]
    async fn find_by_id_reports_absence_without_error() {
        let entry = stored_entry(
            Uuid::new_v4(),
            EntryType::Income,
            EntryStatus::Pending,
            dec!(1),
        );
        let id = entry.id.unwrap();
        let repository = Arc::new(MockEntryRepository::with_entries(vec![entry]));
        let service = service(&repository);

        assert!(service.find_by_id(id).await.unwrap().is_some());
        assert!(service.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn balance_is_zero_without_confirmed_entries() {
        let user_id = Uuid::new_v4();
        let repository = Arc::new(MockEntryRepository::with_entries(vec![
            stored_entry(user_id, EntryType::Income, EntryStatus::Pending, dec!(100)),
            stored_entry(user_id, EntryType::Expense, EntryStatus::Cancelled, dec!(30)),
        ]));

        let balance = service(&repository).compute_balance(user_id).await.unwrap();

        assert_eq!(balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn balance_is_confirmed_income_minus_confirmed_expense() {
        let user_id = Uuid::new_v4();
        let repository = Arc::new(MockEntryRepository::with_entries(vec![
            stored_entry(user_id, EntryType::Income, EntryStatus::Confirmed, dec!(100.00)),
            stored_entry(user_id, EntryType::Income, EntryStatus::Confirmed, dec!(50.00)),
            stored_entry(user_id, EntryType::Expense, EntryStatus::Confirmed, dec!(30.00)),
            stored_entry(user_id, EntryType::Expense, EntryStatus::Pending, dec!(999.99)),
            stored_entry(
                Uuid::new_v4(),
                EntryType::Income,
                EntryStatus::Confirmed,
                dec!(1000),
            ),
        ]));

        let balance = service(&repository).compute_balance(user_id).await.unwrap();

        assert_eq!(balance, dec!(120.00));
        assert_eq!(balance.to_string(), "120.00");
    }

    #[tokio::test]
    async fn balance_keeps_cent_precision() {
        let user_id = Uuid::new_v4();
        let mut entries: Vec<Entry> = (0..10)
            .map(|_| stored_entry(user_id, EntryType::Income, EntryStatus::Confirmed, dec!(0.10)))
            .collect();
        entries.push(stored_entry(
            user_id,
            EntryType::Expense,
            EntryStatus::Confirmed,
            dec!(0.30),
        ));
        let repository = Arc::new(MockEntryRepository::with_entries(entries));

        let balance = service(&repository).compute_balance(user_id).await.unwrap();

        assert_eq!(balance, dec!(0.70));
    }
}
