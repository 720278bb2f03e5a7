use axum::{
    extract::{Path, State},
    Json,
};
use models::{Admin, AdminFields};

use crate::errors::ApiError;
use crate::extract::LenientJson;
use crate::state::AppState;

pub async fn list_admins(State(state): State<AppState>) -> Json<Vec<Admin>> {
    Json(state.store.admins().list().await)
}

pub async fn get_admin(
    State(state): State<AppState>,
    Path(empid): Path<String>,
) -> Result<Json<Admin>, ApiError> {
    Ok(Json(state.store.admins().get(&empid).await?))
}

pub async fn update_admin(
    State(state): State<AppState>,
    Path(empid): Path<String>,
    LenientJson(patch): LenientJson<AdminFields>,
) -> Result<Json<Admin>, ApiError> {
    Ok(Json(state.store.admins().update(&empid, patch).await?))
}
