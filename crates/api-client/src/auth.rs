//! Auth endpoints. Credentials go straight to the records API, which issues
//! the tokens; nothing is stored here.

use async_trait::async_trait;
use log::info;
use masjid_core::auth::{AuthServiceTrait, AuthSession, AuthUser, Credentials, ProfileUpdate, Registration};
use masjid_core::errors::Result;
use serde::Deserialize;
use serde_json::json;

use crate::client::MasjidApiClient;

/// `/auth/me` answers either with the user or with `{ "user": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserResponse {
    Wrapped {
        #[serde(alias = "mosque")]
        user: AuthUser,
    },
    Bare(AuthUser),
}

impl From<UserResponse> for AuthUser {
    fn from(response: UserResponse) -> Self {
        match response {
            UserResponse::Wrapped { user } => user,
            UserResponse::Bare(user) => user,
        }
    }
}

#[async_trait]
impl AuthServiceTrait for MasjidApiClient {
    async fn register(&self, registration: &Registration) -> Result<AuthSession> {
        let session: AuthSession = self.post("/auth/register", registration).await?;
        info!("Registered account {}", session.user.id);
        Ok(session)
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        self.post("/auth/login", credentials).await
    }

    async fn guest_login(&self) -> Result<AuthSession> {
        self.post("/auth/guest-login", &json!({})).await
    }

    async fn me(&self, token: &str) -> Result<AuthUser> {
        let response: UserResponse = self.with_token(token)?.get("/auth/me").await?;
        Ok(response.into())
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<AuthUser> {
        let response: UserResponse = self.with_token(token)?.put("/auth/profile", update).await?;
        Ok(response.into())
    }
}
