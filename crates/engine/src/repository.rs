//! Storage collaborators used by the services.
//!
//! Each call is expected to be atomic on its own; the services never group
//! calls into a larger transaction.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Entry, EntryFilter, EntryStatus, EntryType, ResultEngine, User};

#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert or update the entry keyed by its identity, assigning one when
    /// absent. Returns the stored entry.
    async fn save(&self, entry: Entry) -> ResultEngine<Entry>;

    async fn delete(&self, entry: &Entry) -> ResultEngine<()>;

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<Entry>>;

    /// Entries satisfying [`EntryFilter::matches`].
    async fn find_matching(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>>;

    /// Sum of the values of every entry of `kind` owned by the user, `None`
    /// when there is none.
    async fn sum_by_type_and_user(
        &self,
        user_id: Uuid,
        kind: EntryType,
    ) -> ResultEngine<Option<Decimal>>;

    /// Same as [`sum_by_type_and_user`](Self::sum_by_type_and_user),
    /// restricted to one status.
    async fn sum_by_type_and_user_and_status(
        &self,
        user_id: Uuid,
        kind: EntryType,
        status: EntryStatus,
    ) -> ResultEngine<Option<Decimal>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update the user keyed by its identity, assigning one when
    /// absent. Returns the stored user.
    async fn save(&self, user: User) -> ResultEngine<User>;

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<User>>;

    async fn find_by_email(&self, email: &str) -> ResultEngine<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> ResultEngine<bool>;
}
