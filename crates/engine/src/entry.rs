//! The module contains the `Entry` type representing a financial entry of a
//! user.
//!
//! Both expenses and income are represented by `Entry`; the `kind` tells them
//! apart and only `Confirmed` entries count towards the balance.
use core::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

/// Classification of an entry's effect on the balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for EntryType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("income") {
            Ok(Self::Income)
        } else if value.eq_ignore_ascii_case("expense") {
            Ok(Self::Expense)
        } else {
            Err(EngineError::InvalidValue(format!("invalid entry type: {value}")))
        }
    }
}

/// Lifecycle status of an entry.
///
/// Any status can be set from any other one: there is no transition table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for EntryStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("pending") {
            Ok(Self::Pending)
        } else if value.eq_ignore_ascii_case("confirmed") {
            Ok(Self::Confirmed)
        } else if value.eq_ignore_ascii_case("cancelled") {
            Ok(Self::Cancelled)
        } else {
            Err(EngineError::InvalidValue(format!(
                "invalid entry status: {value}"
            )))
        }
    }
}

/// A financial entry owned by a user.
///
/// Every business field is optional so that a candidate coming from the
/// outside world can be checked by [`validate`](crate::validate) before it
/// reaches storage. The owner is referenced by identity only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Server-assigned identity. `None` until the entry is persisted.
    pub id: Option<Uuid>,
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub value: Option<Decimal>,
    pub kind: Option<EntryType>,
    pub status: EntryStatus,
    pub user_id: Option<Uuid>,
    pub registered_at: Option<NaiveDate>,
}

impl Entry {
    /// Build a not-yet-persisted entry with every required field set.
    pub fn new(
        description: &str,
        month: i32,
        year: i32,
        value: Decimal,
        kind: EntryType,
        user_id: Uuid,
    ) -> Self {
        Self {
            id: None,
            description: Some(description.to_string()),
            month: Some(month),
            year: Some(year),
            value: Some(value),
            kind: Some(kind),
            status: EntryStatus::Pending,
            user_id: Some(user_id),
            registered_at: None,
        }
    }

}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{} {} {} ({})",
            self.month.unwrap_or_default(),
            self.year.unwrap_or_default(),
            self.value.unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.status.as_str()
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    pub month: i32,
    pub year: i32,
    /// Canonical decimal text, never a float.
    pub value: String,
    pub kind: String,
    pub status: String,
    pub user_id: String,
    pub registered_at: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn missing(field: &str) -> EngineError {
    EngineError::InvalidValue(format!("entry {field} is missing"))
}

impl TryFrom<&Entry> for ActiveModel {
    type Error = EngineError;

    fn try_from(entry: &Entry) -> Result<Self, Self::Error> {
        let id = entry.id.ok_or_else(|| missing("id"))?;
        let value = entry.value.ok_or_else(|| missing("value"))?;
        let kind = entry.kind.ok_or_else(|| missing("type"))?;
        let user_id = entry.user_id.ok_or_else(|| missing("user"))?;
        Ok(Self {
            id: ActiveValue::Set(id.to_string()),
            description: ActiveValue::Set(
                entry.description.clone().ok_or_else(|| missing("description"))?,
            ),
            month: ActiveValue::Set(entry.month.ok_or_else(|| missing("month"))?),
            year: ActiveValue::Set(entry.year.ok_or_else(|| missing("year"))?),
            value: ActiveValue::Set(value.to_string()),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            status: ActiveValue::Set(entry.status.as_str().to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            registered_at: ActiveValue::Set(
                entry.registered_at.ok_or_else(|| missing("registration date"))?,
            ),
        })
    }
}

impl TryFrom<Model> for Entry {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Some(parse_uuid(&model.id, "entry")?),
            description: Some(model.description),
            month: Some(model.month),
            year: Some(model.year),
            value: Some(parse_decimal(&model.value)?),
            kind: Some(EntryType::try_from(model.kind.as_str())?),
            status: EntryStatus::try_from(model.status.as_str())?,
            user_id: Some(parse_uuid(&model.user_id, "user")?),
            registered_at: Some(model.registered_at),
        })
    }
}

/// Parse a stored decimal value.
pub(crate) fn parse_decimal(value: &str) -> ResultEngine<Decimal> {
    Decimal::from_str(value)
        .map_err(|_| EngineError::InvalidValue(format!("invalid stored value: {value}")))
}
