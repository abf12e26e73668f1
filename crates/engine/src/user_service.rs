//! Registration and email/password authentication.
//!
//! Passwords are compared as plain strings, exactly as they were stored.

use std::sync::Arc;

use uuid::Uuid;

use crate::{EngineError, ResultEngine, User, UserRepository};

pub const EMAIL_IN_USE: &str = "Já existe um usuário cadastrado com esse email.";
pub const UNKNOWN_EMAIL: &str = "Usuário não encontrado para o email informado.";
pub const WRONG_PASSWORD: &str = "Senha inválida.";

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Store a new user once its email is known to be free.
    pub async fn register(&self, user: User) -> ResultEngine<User> {
        self.validate_email(&user.email).await?;
        let saved = self.repository.save(user).await?;
        tracing::info!("user registered: {}", saved.email);
        Ok(saved)
    }

    /// Return the user owning `email` if `password` matches.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| EngineError::Authentication(UNKNOWN_EMAIL.to_string()))?;

        if user.password != password {
            tracing::debug!("wrong password for {email}");
            return Err(EngineError::Authentication(WRONG_PASSWORD.to_string()));
        }

        Ok(user)
    }

    /// Fail when a user with `email` is already registered.
    pub async fn validate_email(&self, email: &str) -> ResultEngine<()> {
        if self.repository.exists_by_email(email).await? {
            return Err(EngineError::BusinessRule(EMAIL_IN_USE.to_string()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<User>> {
        self.repository.find_by_id(id).await
    }
}
