use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use masjid_api_client::{MasjidApiClient, WebhookCodeDelivery};
use masjid_core::{
    auth::{AuthServiceTrait, CodeDeliveryTrait, OneTimeCodeConfig, OneTimeCodeService},
    dashboard::{DashboardService, LedgerSourceTrait, ProjectionCache},
    errors::{Error, Result},
    recycle_bin::RecycleBinServiceTrait,
    settings::LedgerSettings,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Hands out the collaborators that act on behalf of a caller's token.
pub trait CollaboratorsTrait: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthServiceTrait>;
    fn ledger_source(&self, token: &str) -> Result<Arc<dyn LedgerSourceTrait>>;
    fn recycle_bin(&self, token: &str) -> Result<Arc<dyn RecycleBinServiceTrait>>;
}

/// Collaborators backed by the records API.
pub struct ApiCollaborators {
    client: MasjidApiClient,
}

impl ApiCollaborators {
    pub fn new(client: MasjidApiClient) -> Self {
        Self { client }
    }
}

impl CollaboratorsTrait for ApiCollaborators {
    fn auth(&self) -> Arc<dyn AuthServiceTrait> {
        Arc::new(self.client.clone())
    }

    fn ledger_source(&self, token: &str) -> Result<Arc<dyn LedgerSourceTrait>> {
        Ok(Arc::new(self.client.with_token(token)?))
    }

    fn recycle_bin(&self, token: &str) -> Result<Arc<dyn RecycleBinServiceTrait>> {
        Ok(Arc::new(self.client.with_token(token)?))
    }
}

/// Fallback when no code webhook is configured: the code only reaches the log.
pub struct LogCodeDelivery;

#[async_trait]
impl CodeDeliveryTrait for LogCodeDelivery {
    async fn deliver(&self, recipient: &str, code: &str, expires_at: DateTime<Utc>) -> Result<()> {
        tracing::warn!(
            "No code webhook configured; verification code for {} is {} (expires {})",
            recipient,
            code,
            expires_at
        );
        Ok(())
    }
}

pub struct AppState {
    pub settings: LedgerSettings,
    pub collaborators: Arc<dyn CollaboratorsTrait>,
    pub projection_cache: Arc<ProjectionCache>,
    pub codes: Arc<OneTimeCodeService>,
}

impl AppState {
    pub fn new(
        settings: LedgerSettings,
        collaborators: Arc<dyn CollaboratorsTrait>,
        codes: Arc<OneTimeCodeService>,
    ) -> Self {
        Self {
            settings,
            collaborators,
            projection_cache: Arc::new(ProjectionCache::new()),
            codes,
        }
    }

    /// Dashboard service reading the records visible to `token`.
    ///
    /// The projection cache is shared by every request.
    pub fn dashboard_service(&self, token: &str) -> Result<DashboardService> {
        let source = self.collaborators.ledger_source(token)?;
        Ok(DashboardService::new(
            source,
            self.settings.clone(),
            Arc::clone(&self.projection_cache),
        ))
    }
}

pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = MasjidApiClient::with_timeout(&config.api_url, config.request_timeout)?;
    tracing::info!("Records API in use: {}", client.base_url());

    let delivery: Arc<dyn CodeDeliveryTrait> = match &config.code_webhook_url {
        Some(url) => Arc::new(WebhookCodeDelivery::new(url)?),
        None => {
            tracing::warn!("MASJID_CODE_WEBHOOK_URL not set; verification codes will be logged");
            Arc::new(LogCodeDelivery)
        }
    };
    let ttl = chrono::Duration::from_std(config.code_ttl)
        .map_err(|e| Error::InvalidConfigValue(format!("code ttl: {}", e)))?;
    let codes = OneTimeCodeService::new(
        OneTimeCodeConfig {
            ttl,
            ..Default::default()
        },
        delivery,
    );

    tracing::info!(
        "Ledger settings: imam salary cutoff {}, default join month {}, timezone {}",
        config.ledger.imam_salary_cutoff,
        config.ledger.default_join_month,
        config.ledger.timezone
    );

    Ok(Arc::new(AppState::new(
        config.ledger.clone(),
        Arc::new(ApiCollaborators::new(client)),
        Arc::new(codes),
    )))
}
