use async_trait::async_trait;

use crate::auth::auth_model::{AuthSession, AuthUser, Credentials, ProfileUpdate, Registration};
use crate::errors::Result;

/// Trait for the external authentication service.
///
/// Credentials are verified and tokens issued by the implementation; callers
/// only ever hold the opaque token.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<AuthSession>;
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession>;
    async fn guest_login(&self) -> Result<AuthSession>;
    async fn me(&self, token: &str) -> Result<AuthUser>;
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<AuthUser>;
}
