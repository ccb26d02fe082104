//! Tenant handlers. Ownership is enforced by [`AccessControl`](rentbook_core::services::AccessControl).

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rentbook_core::{NewBill, NewTenant, TenantPatch};

use crate::extract::{CurrentUser, PathId, ValidatedJson};
use crate::response::ApiError;
use crate::state::AppState;

/// GET /api/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let tenants = state.access.list_tenants(&user).await?;
    Ok(Json(tenants))
}

/// POST /api/tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<NewTenant>,
) -> Result<impl IntoResponse, ApiError> {
    let tenant = state.access.create_tenant(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

/// GET /api/tenants/{id}
pub async fn get_tenant(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    let tenant = state.access.get_tenant(&user, id).await?;
    Ok(Json(tenant))
}

/// PATCH /api/tenants/{id}
pub async fn update_tenant(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
    ValidatedJson(patch): ValidatedJson<TenantPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let tenant = state.access.update_tenant(&user, id, patch).await?;
    Ok(Json(tenant))
}

/// DELETE /api/tenants/{id}
pub async fn delete_tenant(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    state.access.delete_tenant(&user, id).await?;
    Ok(Json(serde_json::json!({ "message": "Tenant deleted" })))
}

/// GET /api/tenants/{id}/bills
pub async fn list_bills(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    let bills = state.access.list_bills(&user, id).await?;
    Ok(Json(bills))
}

/// POST /api/tenants/{id}/bills
pub async fn create_bill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
    ValidatedJson(payload): ValidatedJson<NewBill>,
) -> Result<impl IntoResponse, ApiError> {
    let bill = state.access.create_bill(&user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}
