use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use masjid_core::{auth::View, dashboard::DashboardServiceTrait, ledger::MemberDues};

use crate::{api::AsOfQuery, auth::Session, error::ApiResult, main_lib::AppState};

async fn list_member_dues(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<Vec<MemberDues>>> {
    session.require_view(View::Members)?;
    let dues = state
        .dashboard_service(&session.token)?
        .get_member_dues(query.as_of)
        .await?;
    Ok(Json(dues))
}

async fn get_member_dues(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<MemberDues>> {
    session.require_view(View::Members)?;
    let dues = state
        .dashboard_service(&session.token)?
        .get_member_dues_by_id(&id, query.as_of)
        .await?;
    Ok(Json(dues))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/members/dues", get(list_member_dues))
        .route("/members/{id}/dues", get(get_member_dues))
}
