/// Users API routes
use crate::{error::Result, extract::PayloadBody, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mockdb_core::{InsertedUser, RemovedUser, UpdatedUser, UserRecord};

/// GET /api/users
/// List every user in insertion order
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<UserRecord>>> {
    let users = app_state.store.read().await.get_all();
    Ok(Json(users))
}

/// GET /api/users/:id
/// Fetch one user; responds with `null` when the id matches nothing
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Option<UserRecord>>> {
    let user = app_state.store.read().await.get_one(id.as_str());
    Ok(Json(user))
}

/// POST /api/users
/// Create a user from the request body
pub async fn create_user(
    State(app_state): State<AppState>,
    PayloadBody(payload): PayloadBody,
) -> Result<(StatusCode, Json<InsertedUser>)> {
    let inserted = app_state.store.write().await.add(payload)?;

    tracing::info!("Created user {}", inserted.inserted_user.id);

    Ok((StatusCode::CREATED, Json(inserted)))
}

/// PUT|PATCH /api/users/:id
/// Merge the request body into an existing user
pub async fn update_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    PayloadBody(payload): PayloadBody,
) -> Result<Json<UpdatedUser>> {
    let updated = app_state.store.write().await.update(id.as_str(), payload)?;

    tracing::info!("Updated user {}", updated.updated_row.id);

    Ok(Json(updated))
}

/// DELETE /api/users/:id
/// Remove a user
pub async fn delete_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<RemovedUser>> {
    let removed = app_state.store.write().await.remove(id.as_str())?;

    tracing::info!("Removed user {}", removed.removed_row_id);

    Ok(Json(removed))
}

/// POST /api/reset
/// Restore the seed records and return them
pub async fn reset_users(State(app_state): State<AppState>) -> Result<Json<Vec<UserRecord>>> {
    let mut store = app_state.store.write().await;
    store.reset();

    tracing::info!("Store reset to seed data");

    Ok(Json(store.get_all()))
}
