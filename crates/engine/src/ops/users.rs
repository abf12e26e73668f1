use async_trait::async_trait;
use uuid::Uuid;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, PaginatorTrait, QueryFilter, TransactionTrait,
    prelude::*,
};

use crate::{ResultEngine, User, UserRepository, users, util::today};

use super::with_tx;

/// [`UserRepository`] backed by the `users` table.
#[derive(Clone, Debug)]
pub struct SeaOrmUserRepository {
    database: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, user: User) -> ResultEngine<User> {
        let mut user = user;
        let id = *user.id.get_or_insert_with(Uuid::new_v4);

        with_tx!(self, |db_tx| {
            let existing = users::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;

            match existing {
                Some(stored) => {
                    user.registered_at = user.registered_at.or(Some(stored.registered_at));
                    users::ActiveModel::try_from(&user)?.update(&db_tx).await?;
                }
                None => {
                    user.registered_at = user.registered_at.or_else(|| Some(today()));
                    users::ActiveModel::try_from(&user)?.insert(&db_tx).await?;
                }
            }

            Ok(user)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<User>> {
        users::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn exists_by_email(&self, email: &str) -> ResultEngine<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }
}
