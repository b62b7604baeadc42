use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use masjid_core::{
    auth::View,
    dashboard::{DashboardServiceTrait, DashboardSummary},
};

use crate::{api::AsOfQuery, auth::Session, error::ApiResult, main_lib::AppState};

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    session.require_view(View::Dashboard)?;
    let service = state.dashboard_service(&session.token)?;
    let summary = service.get_dashboard(query.as_of).await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
