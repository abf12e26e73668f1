use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{EntryService, ResultEngine, UserService};

mod entries;
mod users;

pub use entries::SeaOrmEntryRepository;
pub use users::SeaOrmUserRepository;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry and user services wired to the same database.
#[derive(Clone)]
pub struct Engine {
    entries: EntryService,
    users: UserService,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn entries(&self) -> &EntryService {
        &self.entries
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        let entries = Arc::new(SeaOrmEntryRepository::new(self.database.clone()));
        let users = Arc::new(SeaOrmUserRepository::new(self.database));
        Ok(Engine {
            entries: EntryService::new(entries),
            users: UserService::new(users),
        })
    }
}
