use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use masjid_core::auth::{AuthUser, Role, View};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// The caller behind a request, resolved from its bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn require_view(&self, view: View) -> ApiResult<()> {
        if self.role().can_view(view) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Role {} cannot access {:?}",
                self.role(),
                view
            )))
        }
    }

    pub fn require_modify(&self) -> ApiResult<()> {
        if self.role().can_modify() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Role {} is read-only",
                self.role()
            )))
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> ApiResult<String> {
    let unauthorized = || ApiError::Unauthorized("Missing bearer token".to_string());

    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(unauthorized());
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(unauthorized());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(unauthorized());
    }
    Ok(token.to_string())
}

/// Resolves the caller with the auth service and attaches a [`Session`].
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(request.headers())?;
    let user = state.collaborators.auth().me(&token).await?;
    tracing::debug!("Request by {} ({})", user.id, user.role);

    request.extensions_mut().insert(Session { token, user });
    Ok(next.run(request).await)
}
