//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when an entry breaks one of the field rules.
//! - [`BusinessRule`] thrown when a write conflicts with existing data.
//! - [`Authentication`] thrown when email/password do not identify a user.
//! - [`KeyNotFound`] thrown when an item is not found.
//!
//! A missing identity on update/delete is not an error: it is a contract
//! violation and the engine panics.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`BusinessRule`]: EngineError::BusinessRule
//!  [`Authentication`]: EngineError::Authentication
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
///
/// User-facing variants display their message verbatim.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BusinessRule(String),
    #[error("{0}")]
    Authentication(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::BusinessRule(a), Self::BusinessRule(b)) => a == b,
            (Self::Authentication(a), Self::Authentication(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidValue(a), Self::InvalidValue(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
