//! Delivers one-time codes by POSTing them to a webhook (mail or SMS relay).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use masjid_core::auth::CodeDeliveryTrait;
use masjid_core::errors::{Error, Result};
use serde::Serialize;

const DELIVERY_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CodeMessage<'a> {
    recipient: &'a str,
    code: &'a str,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WebhookCodeDelivery {
    client: reqwest::Client,
    url: String,
}

impl WebhookCodeDelivery {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DELIVERY_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl CodeDeliveryTrait for WebhookCodeDelivery {
    async fn deliver(&self, recipient: &str, code: &str, expires_at: DateTime<Utc>) -> Result<()> {
        debug!("Delivering one-time code to {} via webhook", recipient);
        let response = self
            .client
            .post(&self.url)
            .json(&CodeMessage {
                recipient,
                code,
                expires_at,
            })
            .send()
            .await
            .map_err(|e| Error::CodeDelivery(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::CodeDelivery(format!("Webhook answered {}", status)));
        }
        Ok(())
    }
}
