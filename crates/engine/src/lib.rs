//! Personal finance engine.
//!
//! Users record income and expense entries; the balance of a user is the sum
//! of its confirmed income minus its confirmed expense.

pub use entry::{Entry, EntryStatus, EntryType};
pub use entry_service::EntryService;
pub use error::EngineError;
pub use filter::EntryFilter;
pub use ops::{Engine, EngineBuilder, SeaOrmEntryRepository, SeaOrmUserRepository};
pub use repository::{EntryRepository, UserRepository};
pub use user_service::UserService;
pub use users::User;
pub use validation::validate;

mod entry;
mod entry_service;
mod error;
mod filter;
mod ops;
mod repository;
pub mod user_service;
mod users;
mod util;
pub mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
