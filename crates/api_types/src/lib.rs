use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod entry {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum EntryKind {
        Income,
        Expense,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum EntryStatus {
        #[default]
        Pending,
        Confirmed,
        Cancelled,
    }

    impl std::str::FromStr for EntryStatus {
        type Err = String;

        /// Accepts only the exact upper-case names used on the wire.
        fn from_str(value: &str) -> Result<Self, Self::Err> {
            match value {
                "PENDING" => Ok(Self::Pending),
                "CONFIRMED" => Ok(Self::Confirmed),
                "CANCELLED" => Ok(Self::Cancelled),
                other => Err(format!("unknown entry status: {other}")),
            }
        }
    }

    /// Body of `POST /api/entries` and `PUT /api/entries/{id}`.
    ///
    /// Every field is optional on the wire so that missing values reach the
    /// validator and come back as its message instead of a decoding error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryNew {
        pub description: Option<String>,
        pub month: Option<i32>,
        pub year: Option<i32>,
        pub value: Option<Decimal>,
        pub kind: Option<EntryKind>,
        /// Ignored on creation: new entries always start as `PENDING`.
        pub status: Option<EntryStatus>,
        /// Owner id (UUID).
        pub user: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: Uuid,
        pub description: String,
        pub month: i32,
        pub year: i32,
        pub value: Decimal,
        pub kind: EntryKind,
        pub status: EntryStatus,
        pub user: Uuid,
        pub registered_at: Option<NaiveDate>,
    }

    /// Query string of `GET /api/entries`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryQuery {
        pub description: Option<String>,
        pub month: Option<i32>,
        pub year: Option<i32>,
        pub kind: Option<EntryKind>,
        pub status: Option<EntryStatus>,
        pub user: Uuid,
    }

    /// Body of `PUT /api/entries/{id}/status`.
    ///
    /// Kept as free text so an unknown status gets a readable answer.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusUpdate {
        pub status: String,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    /// A user as returned by the API. The password never leaves the server.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub registered_at: Option<NaiveDate>,
    }
}
