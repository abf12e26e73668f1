//! User API endpoints

use api_types::user::{Credentials, UserNew, UserView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::User;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn user_view(user: User) -> Result<UserView, ServerError> {
    let id = user
        .id
        .ok_or_else(|| ServerError::Generic("user id is missing".to_string()))?;

    Ok(UserView {
        id,
        name: user.name,
        email: user.email,
        registered_at: user.registered_at,
    })
}

/// Handle requests for registering a new user
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .users()
        .register(User::new(&payload.name, &payload.email, &payload.password))
        .await?;

    Ok((StatusCode::CREATED, Json(user_view(user)?)))
}

/// Handle requests for checking a user's credentials
pub async fn authenticate(
    State(state): State<ServerState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .users()
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(user_view(user)?))
}

/// Handle requests for the balance of a user
pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Decimal>, ServerError> {
    if state.engine.users().find_by_id(id).await?.is_none() {
        return Err(ServerError::NotFound(String::new()));
    }

    let balance = state.engine.entries().compute_balance(id).await?;
    Ok(Json(balance))
}
