//! Internal helpers for model conversion.
//!
//! These utilities are **not** part of the public API.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidValue(format!("invalid {label} id")))
}

/// Registration date assigned to rows inserted without one.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
