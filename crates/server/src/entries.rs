//! Entry API endpoints

use api_types::entry::{
    EntryKind as ApiKind, EntryNew, EntryQuery, EntryStatus as ApiStatus, EntryView, StatusUpdate,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Entry, EntryFilter, EntryStatus, EntryType};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

const ENTRY_NOT_FOUND: &str = "Lançamento não encontrado na base de dados.";
const OWNER_NOT_FOUND: &str = "Usuário não encontrado para o id informado.";
const FILTER_USER_NOT_FOUND: &str = "Usuário não encontrado para o ID informado.";
const INVALID_STATUS: &str =
    "Não foi possível atualizar o status do lançamento, envie um status válido.";

fn map_kind(kind: ApiKind) -> EntryType {
    match kind {
        ApiKind::Income => EntryType::Income,
        ApiKind::Expense => EntryType::Expense,
    }
}

fn map_status(status: ApiStatus) -> EntryStatus {
    match status {
        ApiStatus::Pending => EntryStatus::Pending,
        ApiStatus::Confirmed => EntryStatus::Confirmed,
        ApiStatus::Cancelled => EntryStatus::Cancelled,
    }
}

fn entry_view(entry: Entry) -> Result<EntryView, ServerError> {
    let missing = |field: &str| ServerError::Generic(format!("entry {field} is missing"));

    Ok(EntryView {
        id: entry.id.ok_or_else(|| missing("id"))?,
        description: entry.description.ok_or_else(|| missing("description"))?,
        month: entry.month.ok_or_else(|| missing("month"))?,
        year: entry.year.ok_or_else(|| missing("year"))?,
        value: entry.value.ok_or_else(|| missing("value"))?,
        kind: match entry.kind.ok_or_else(|| missing("kind"))? {
            EntryType::Income => ApiKind::Income,
            EntryType::Expense => ApiKind::Expense,
        },
        status: match entry.status {
            EntryStatus::Pending => ApiStatus::Pending,
            EntryStatus::Confirmed => ApiStatus::Confirmed,
            EntryStatus::Cancelled => ApiStatus::Cancelled,
        },
        user: entry.user_id.ok_or_else(|| missing("user"))?,
        registered_at: entry.registered_at,
    })
}

/// Turn a request body into an `Entry`, resolving its owner first.
async fn entry_from_payload(state: &ServerState, payload: EntryNew) -> Result<Entry, ServerError> {
    let user_id = match payload.user {
        Some(id) => match state.engine.users().find_by_id(id).await? {
            Some(user) => user.id,
            None => return Err(ServerError::Generic(OWNER_NOT_FOUND.to_string())),
        },
        None => None,
    };

    Ok(Entry {
        description: payload.description,
        month: payload.month,
        year: payload.year,
        value: payload.value,
        kind: payload.kind.map(map_kind),
        status: payload.status.map(map_status).unwrap_or_default(),
        user_id,
        ..Default::default()
    })
}

async fn stored_entry(state: &ServerState, id: Uuid) -> Result<Entry, ServerError> {
    state
        .engine
        .entries()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServerError::Generic(ENTRY_NOT_FOUND.to_string()))
}

/// Handle requests for creating a new entry
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let entry = entry_from_payload(&state, payload).await?;
    let entry = state.engine.entries().create(entry).await?;

    Ok((StatusCode::CREATED, Json(entry_view(entry)?)))
}

/// Handle requests for searching the entries of a user
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    if state.engine.users().find_by_id(query.user).await?.is_none() {
        return Err(ServerError::Generic(FILTER_USER_NOT_FOUND.to_string()));
    }

    let filter = EntryFilter {
        description: query.description,
        month: query.month,
        year: query.year,
        user_id: Some(query.user),
        kind: query.kind.map(map_kind),
        status: query.status.map(map_status),
    };

    let entries = state
        .engine
        .entries()
        .search(&filter)
        .await?
        .into_iter()
        .map(entry_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(entries))
}

/// Handle requests for a single entry
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryView>, ServerError> {
    let entry = stored_entry(&state, id).await?;
    Ok(Json(entry_view(entry)?))
}

/// Handle requests for rewriting an entry.
///
/// The status and registration date of the stored entry are kept unless the
/// body carries a status.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EntryNew>,
) -> Result<Json<EntryView>, ServerError> {
    let stored = stored_entry(&state, id).await?;
    let keep_status = payload.status.is_none();

    let mut entry = entry_from_payload(&state, payload).await?;
    entry.id = stored.id;
    entry.registered_at = stored.registered_at;
    if keep_status {
        entry.status = stored.status;
    }

    let entry = state.engine.entries().update(entry).await?;
    Ok(Json(entry_view(entry)?))
}

/// Handle requests for moving an entry to another status
pub async fn change_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<EntryView>, ServerError> {
    let entry = stored_entry(&state, id).await?;
    let status = payload
        .status
        .parse::<ApiStatus>()
        .map(map_status)
        .map_err(|_| ServerError::Generic(INVALID_STATUS.to_string()))?;

    let entry = state.engine.entries().change_status(entry, status).await?;
    Ok(Json(entry_view(entry)?))
}

/// Handle requests for deleting an entry
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let entry = stored_entry(&state, id).await?;
    state.engine.entries().delete(&entry).await?;

    Ok(StatusCode::NO_CONTENT)
}
