//! Field rules an entry must satisfy before it is written.
//!
//! Rules are checked in a fixed order and the first violation wins; the
//! messages are shown to users as they are.

use rust_decimal::Decimal;

use crate::{EngineError, Entry, ResultEngine};

pub const INVALID_DESCRIPTION: &str = "Informe uma descrição válida!";
pub const INVALID_MONTH: &str = "Informe um mês válido";
pub const INVALID_YEAR: &str = "Informe um ano válido";
pub const MISSING_USER: &str = "Informe um usuário";
pub const INVALID_VALUE: &str = "Informe um valor válido";
pub const MISSING_TYPE: &str = "Informe um tipo de lançamento";

fn reject(message: &str) -> ResultEngine<()> {
    Err(EngineError::Validation(message.to_string()))
}

/// Check an entry against the field rules.
///
/// The year is valid when its decimal rendering is exactly four characters
/// long.
pub fn validate(entry: &Entry) -> ResultEngine<()> {
    if entry
        .description
        .as_deref()
        .is_none_or(|description| description.trim().is_empty())
    {
        return reject(INVALID_DESCRIPTION);
    }

    if entry.month.is_none_or(|month| !(1..=12).contains(&month)) {
        return reject(INVALID_MONTH);
    }

    if entry.year.is_none_or(|year| year.to_string().len() != 4) {
        return reject(INVALID_YEAR);
    }

    if entry.user_id.is_none() {
        return reject(MISSING_USER);
    }

    if entry.value.is_none_or(|value| value <= Decimal::ZERO) {
        return reject(INVALID_VALUE);
    }

    if entry.kind.is_none() {
        return reject(MISSING_TYPE);
    }

    Ok(())
}
