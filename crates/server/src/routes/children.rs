use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{Child, ChildPatch, NewChild};
use serde::Serialize;

use crate::errors::ApiError;
use crate::extract::LenientJson;
use crate::state::AppState;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeletedChild {
    pub message: &'static str,
    pub deleted_child: Vec<Child>,
}

pub async fn list_children(State(state): State<AppState>) -> Json<Vec<Child>> {
    Json(state.store.children().list().await)
}

pub async fn get_child(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Child>, ApiError> {
    Ok(Json(state.store.children().get(&id).await?))
}

/// The submitted `parentkey` is not checked against existing parents.
pub async fn create_child(
    State(state): State<AppState>,
    LenientJson(fields): LenientJson<NewChild>,
) -> (StatusCode, Json<Child>) {
    let child = state.store.create_child(fields).await;
    (StatusCode::CREATED, Json(child))
}

pub async fn update_child(
    State(state): State<AppState>,
    Path(id): Path<String>,
    LenientJson(patch): LenientJson<ChildPatch>,
) -> Result<Json<Child>, ApiError> {
    Ok(Json(state.store.children().update(&id, patch).await?))
}

pub async fn delete_child(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedChild>, ApiError> {
    let removed = state.store.children().remove(&id).await?;
    Ok(Json(DeletedChild { message: "Child deleted", deleted_child: vec![removed] }))
}
