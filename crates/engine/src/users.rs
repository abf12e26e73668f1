//! Users table and the `User` domain type.
//!
//! The password is stored and compared exactly as supplied.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

/// A registered user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    /// Server-assigned identity. `None` until the user is persisted.
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub registered_at: Option<NaiveDate>,
}

impl User {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            registered_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub registered_at: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entry::Entity")]
    Entries,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&User> for ActiveModel {
    type Error = EngineError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let id = user
            .id
            .ok_or_else(|| EngineError::InvalidValue("user id is missing".to_string()))?;
        let registered_at = user.registered_at.ok_or_else(|| {
            EngineError::InvalidValue("user registration date is missing".to_string())
        })?;
        Ok(Self {
            id: ActiveValue::Set(id.to_string()),
            name: ActiveValue::Set(user.name.clone()),
            email: ActiveValue::Set(user.email.clone()),
            password: ActiveValue::Set(user.password.clone()),
            registered_at: ActiveValue::Set(registered_at),
        })
    }
}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Some(parse_uuid(&model.id, "user")?),
            name: model.name,
            email: model.email,
            password: model.password,
            registered_at: Some(model.registered_at),
        })
    }
}
