//! Login, registration and profile routes. Credentials and tokens belong to
//! the records API; registration is additionally gated by a one-time code
//! sent to the address being registered.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use masjid_core::{
    auth::{AuthSession, AuthUser, Credentials, ProfileUpdate, Registration, View},
    errors::{Error as CoreError, ValidationError},
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::Session,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct CodeRequest {
    email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CodeIssued {
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RegisterRequest {
    #[serde(flatten)]
    registration: Registration,
    code: String,
}

fn require_field(name: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::from(ValidationError::MissingField(name.to_string())).into());
    }
    Ok(())
}

async fn request_registration_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CodeRequest>,
) -> ApiResult<Json<CodeIssued>> {
    require_field("email", &body.email)?;
    let email = body.email.trim();
    let expires_at = state.codes.issue(email, email, Utc::now()).await?;
    Ok(Json(CodeIssued { expires_at }))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Json<AuthSession>> {
    let registration = body.registration;
    require_field("mosqueName", &registration.mosque_name)?;
    require_field("email", &registration.email)?;
    require_field("password", &registration.password)?;

    state
        .codes
        .verify(&registration.email, &body.code, Utc::now())
        .await?;
    // The code stays valid until the account actually exists
    let session = state.collaborators.auth().register(&registration).await?;
    state.codes.consume(&registration.email, &body.code).await;
    Ok(Json(session))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<AuthSession>> {
    require_field("email", &credentials.email)?;
    require_field("password", &credentials.password)?;
    let session = state.collaborators.auth().login(&credentials).await?;
    tracing::info!("{} logged in as {}", session.user.id, session.user.role);
    Ok(Json(session))
}

async fn guest_login(State(state): State<Arc<AppState>>) -> ApiResult<Json<AuthSession>> {
    let session = state.collaborators.auth().guest_login().await?;
    Ok(Json(session))
}

async fn me(Extension(session): Extension<Session>) -> Json<AuthUser> {
    Json(session.user)
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<AuthUser>> {
    session.require_view(View::Profile)?;
    session.require_modify()?;
    if update == ProfileUpdate::default() {
        return Err(ApiError::BadRequest("Nothing to update".to_string()));
    }
    let user = state
        .collaborators
        .auth()
        .update_profile(&session.token, &update)
        .await?;
    Ok(Json(user))
}

/// Routes reachable without a token.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register/code", post(request_registration_code))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/guest-login", post(guest_login))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
}
