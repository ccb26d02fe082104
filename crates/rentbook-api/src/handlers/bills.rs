use axum::{extract::State, response::IntoResponse, Json};
use rentbook_core::BillPatch;

use crate::extract::{CurrentUser, PathId, ValidatedJson};
use crate::response::ApiError;
use crate::state::AppState;

/// GET /api/bills/{id}
pub async fn get_bill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    let bill = state.access.get_bill(&user, id).await?;
    Ok(Json(bill))
}

/// PATCH /api/bills/{id}
pub async fn update_bill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
    ValidatedJson(patch): ValidatedJson<BillPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let bill = state.access.update_bill(&user, id, patch).await?;
    Ok(Json(bill))
}

/// DELETE /api/bills/{id}
pub async fn delete_bill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    state.access.delete_bill(&user, id).await?;
    Ok(Json(serde_json::json!({ "message": "Bill deleted" })))
}
