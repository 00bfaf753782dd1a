/// Liveness route
use crate::state::AppState;
use axum::{extract::State, Json};
use mockdb_core::RecordId;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub status: &'static str,
    pub records: usize,
    pub next_id: RecordId,
}

/// GET /api/health
/// Report that the store is reachable, with its size and the id the next
/// create will receive
pub async fn health(State(app_state): State<AppState>) -> Json<StoreStatus> {
    let store = app_state.store.read().await;

    Json(StoreStatus {
        status: "ok",
        records: store.len(),
        next_id: store.next_id(),
    })
}
