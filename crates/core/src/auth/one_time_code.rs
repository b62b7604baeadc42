//! Short-lived numeric codes for verifying a contact address.
//!
//! Codes are kept only as SHA-256 digests, expire after a TTL measured
//! against the instant passed in by the caller, and are dropped after too
//! many wrong guesses. A correct code stays pending until the caller consumes
//! it, so a failed follow-up step can be retried with the same code.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::errors::{Error, Result};

/// Sends a freshly issued code to its recipient.
#[async_trait]
pub trait CodeDeliveryTrait: Send + Sync {
    async fn deliver(&self, recipient: &str, code: &str, expires_at: DateTime<Utc>) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct OneTimeCodeConfig {
    pub ttl: Duration,
    pub code_length: usize,
    pub max_attempts: u32,
}

impl Default for OneTimeCodeConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(5),
            code_length: 6,
            max_attempts: 5,
        }
    }
}

struct PendingCode {
    digest: String,
    expires_at: DateTime<Utc>,
    attempts_left: u32,
}

pub struct OneTimeCodeService {
    config: OneTimeCodeConfig,
    delivery: Arc<dyn CodeDeliveryTrait>,
    pending: Mutex<HashMap<String, PendingCode>>,
}

impl OneTimeCodeService {
    pub fn new(config: OneTimeCodeConfig, delivery: Arc<dyn CodeDeliveryTrait>) -> Self {
        Self {
            config,
            delivery,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Issues a code for `subject` and sends it to `recipient`.
    ///
    /// Replaces any code still pending for the subject. Returns the expiry.
    pub async fn issue(
        &self,
        subject: &str,
        recipient: &str,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let subject = normalize(subject);
        let code = generate_code(self.config.code_length);
        let expires_at = now + self.config.ttl;

        let issued = digest(&subject, &code);

        {
            let mut pending = self.pending.lock().await;
            pending.retain(|_, p| p.expires_at > now);
            pending.insert(
                subject.clone(),
                PendingCode {
                    digest: issued.clone(),
                    expires_at,
                    attempts_left: self.config.max_attempts,
                },
            );
        }

        if let Err(e) = self.delivery.deliver(recipient, &code, expires_at).await {
            warn!("Failed to deliver one-time code for {}: {}", subject, e);
            let mut pending = self.pending.lock().await;
            // A concurrent issue may have replaced our code in the meantime
            if pending
                .get(&subject)
                .is_some_and(|p| p.digest == issued && p.expires_at == expires_at)
            {
                pending.remove(&subject);
            }
            return Err(match e {
                Error::CodeDelivery(message) => Error::CodeDelivery(message),
                other => Error::CodeDelivery(other.to_string()),
            });
        }

        debug!("Issued one-time code for {} (expires {})", subject, expires_at);
        Ok(expires_at)
    }

    /// Checks `code` against the one pending for `subject`.
    ///
    /// A match leaves the code pending; call [`consume`](Self::consume) once
    /// the step it guards has succeeded. Wrong guesses use up attempts.
    pub async fn verify(&self, subject: &str, code: &str, now: DateTime<Utc>) -> Result<()> {
        let subject = normalize(subject);
        let mut pending = self.pending.lock().await;

        let Some(entry) = pending.get_mut(&subject) else {
            return Err(Error::Unauthorized(
                "No verification code pending".to_string(),
            ));
        };

        if entry.expires_at <= now {
            pending.remove(&subject);
            return Err(Error::Unauthorized("Verification code expired".to_string()));
        }

        if entry.digest == digest(&subject, code.trim()) {
            return Ok(());
        }

        entry.attempts_left = entry.attempts_left.saturating_sub(1);
        if entry.attempts_left == 0 {
            warn!("Too many wrong codes for {}; discarding it", subject);
            pending.remove(&subject);
        }
        Err(Error::Unauthorized("Invalid verification code".to_string()))
    }

    /// Drops the pending code for `subject` if it is still `code`.
    ///
    /// A code re-issued since verification is left alone.
    pub async fn consume(&self, subject: &str, code: &str) {
        let subject = normalize(subject);
        let mut pending = self.pending.lock().await;
        if pending
            .get(&subject)
            .is_some_and(|p| p.digest == digest(&subject, code.trim()))
        {
            pending.remove(&subject);
            debug!("Consumed one-time code for {}", subject);
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}

fn normalize(subject: &str) -> String {
    subject.trim().to_ascii_lowercase()
}

fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length.max(1))
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn digest(subject: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(subject.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}
