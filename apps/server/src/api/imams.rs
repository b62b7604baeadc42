use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use masjid_core::{auth::View, dashboard::DashboardServiceTrait, ledger::ImamLedger};

use crate::{api::AsOfQuery, auth::Session, error::ApiResult, main_lib::AppState};

async fn list_imam_ledgers(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<Vec<ImamLedger>>> {
    session.require_view(View::Imams)?;
    let ledgers = state
        .dashboard_service(&session.token)?
        .get_imam_ledgers(query.as_of)
        .await?;
    Ok(Json(ledgers))
}

async fn get_imam_ledger(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<ImamLedger>> {
    session.require_view(View::Imams)?;
    let ledger = state
        .dashboard_service(&session.token)?
        .get_imam_ledger(&id, query.as_of)
        .await?;
    Ok(Json(ledger))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/imams/ledger", get(list_imam_ledgers))
        .route("/imams/{id}/ledger", get(get_imam_ledger))
}
