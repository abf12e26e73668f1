use axum::{http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{router, run, run_with_listener, spawn_with_listener};

mod entries;
mod server;
mod users;

pub mod types {
    pub mod entry {
        pub use api_types::entry::{
            EntryKind, EntryNew, EntryQuery, EntryStatus, EntryView, StatusUpdate,
        };
    }

    pub mod user {
        pub use api_types::user::{Credentials, UserNew, UserView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    NotFound(String),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Validation(_)
        | EngineError::BusinessRule(_)
        | EngineError::Authentication(_)
        | EngineError::InvalidValue(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

/// Failures are answered with the bare message as a plain-text body.
impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, message).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
