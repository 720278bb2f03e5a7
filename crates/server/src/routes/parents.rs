use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{Parent, ParentFields};
use serde::Serialize;

use crate::errors::ApiError;
use crate::extract::LenientJson;
use crate::state::AppState;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeletedParent {
    pub message: &'static str,
    pub deleted_parent: Vec<Parent>,
}

pub async fn list_parents(State(state): State<AppState>) -> Json<Vec<Parent>> {
    Json(state.store.parents().list().await)
}

pub async fn get_parent(
    State(state): State<AppState>,
    Path(parentkey): Path<String>,
) -> Result<Json<Parent>, ApiError> {
    Ok(Json(state.store.parents().get(&parentkey).await?))
}

pub async fn create_parent(
    State(state): State<AppState>,
    LenientJson(fields): LenientJson<ParentFields>,
) -> (StatusCode, Json<Parent>) {
    let parent = state.store.create_parent(fields).await;
    (StatusCode::CREATED, Json(parent))
}

pub async fn update_parent(
    State(state): State<AppState>,
    Path(parentkey): Path<String>,
    LenientJson(patch): LenientJson<ParentFields>,
) -> Result<Json<Parent>, ApiError> {
    Ok(Json(state.store.parents().update(&parentkey, patch).await?))
}

pub async fn delete_parent(
    State(state): State<AppState>,
    Path(parentkey): Path<String>,
) -> Result<Json<DeletedParent>, ApiError> {
    let removed = state.store.parents().remove(&parentkey).await?;
    Ok(Json(DeletedParent { message: "Parent deleted", deleted_parent: vec![removed] }))
}
