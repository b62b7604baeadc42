use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use masjid_core::{
    auth::View,
    errors::Error as CoreError,
    recycle_bin::{RecycleBinItem, RecycleBinItemType, RecycleBinServiceTrait},
};
use serde::Serialize;

use crate::{auth::Session, error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RestoredItem {
    id: String,
    #[serde(rename = "type")]
    item_type: RecycleBinItemType,
    record_id: String,
}

async fn list_items(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<RecycleBinItem>>> {
    session.require_view(View::RecycleBin)?;
    let items = state
        .collaborators
        .recycle_bin(&session.token)?
        .list_items()
        .await?;
    Ok(Json(items))
}

async fn restore_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<RestoredItem>> {
    session.require_view(View::RecycleBin)?;
    session.require_modify()?;
    let bin = state.collaborators.recycle_bin(&session.token)?;

    // Only restore items whose data still parses as the record it claims to be
    let item = bin
        .list_items()
        .await?
        .into_iter()
        .find(|item| item.id == id)
        .ok_or_else(|| CoreError::NotFound(format!("Recycle bin item {} not found", id)))?;
    let record = item.decode()?;

    bin.restore_item(&item.id).await?;
    tracing::info!(
        "{} restored {} {}",
        session.user.id,
        record.item_type(),
        record.record_id()
    );
    Ok(Json(RestoredItem {
        id: item.id,
        item_type: record.item_type(),
        record_id: record.record_id().to_string(),
    }))
}

async fn delete_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<StatusCode> {
    session.require_view(View::RecycleBin)?;
    session.require_modify()?;
    state
        .collaborators
        .recycle_bin(&session.token)?
        .delete_item_permanently(&id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn empty_bin(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<StatusCode> {
    session.require_view(View::RecycleBin)?;
    session.require_modify()?;
    state
        .collaborators
        .recycle_bin(&session.token)?
        .empty_bin()
        .await?;
    tracing::info!("{} emptied the recycle bin", session.user.id);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recycle-bin", get(list_items).delete(empty_bin))
        .route("/recycle-bin/{id}", delete(delete_item))
        .route("/recycle-bin/{id}/restore", post(restore_item))
}
