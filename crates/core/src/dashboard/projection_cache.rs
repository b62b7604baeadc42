//! Memoizes ledger projections by snapshot content.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::dashboard::dashboard_model::{LedgerProjection, LedgerSnapshot};
use crate::errors::Result;
use crate::settings::LedgerSettings;

struct CachedProjection {
    key: String,
    projection: Arc<LedgerProjection>,
}

/// Single-slot cache of the most recent projection.
///
/// Projections are pure functions of the snapshot, the settings and the
/// `as_of` date, so the key is a digest of exactly those. Any change in the
/// records produces a new key and the slot is replaced.
#[derive(Default)]
pub struct ProjectionCache {
    slot: RwLock<Option<CachedProjection>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hex SHA-256 digest identifying a projection's inputs.
    pub fn key_for(
        snapshot: &LedgerSnapshot,
        settings: &LedgerSettings,
        as_of: NaiveDate,
    ) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(snapshot)?);
        // JSON carries amounts as f64; the exact decimal text goes in as well
        for amount in exact_amounts(snapshot) {
            hasher.update(amount.normalize().to_string().as_bytes());
            hasher.update(b";");
        }
        hasher.update(serde_json::to_vec(settings)?);
        hasher.update(as_of.to_string().as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    pub async fn get(&self, key: &str) -> Option<Arc<LedgerProjection>> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(cached) if cached.key == key => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Projection cache hit for {}", key.get(..12).unwrap_or(key));
                Some(Arc::clone(&cached.projection))
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub async fn insert(&self, key: String, projection: Arc<LedgerProjection>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CachedProjection { key, projection });
    }

    pub async fn clear(&self) {
        self.slot.write().await.take();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

fn exact_amounts(snapshot: &LedgerSnapshot) -> impl Iterator<Item = Decimal> + '_ {
    let pledges = snapshot.members.iter().map(|m| m.monthly_amount);
    let salaries = snapshot.imams.iter().map(|i| i.monthly_salary);
    pledges
        .chain(salaries)
        .chain(snapshot.payments.iter().map(|p| p.amount))
        .chain(snapshot.imam_salary_payments.iter().map(|p| p.amount))
        .chain(snapshot.imam_payouts.iter().map(|p| p.amount))
        .chain(snapshot.mosque_income.iter().map(|i| i.amount))
        .chain(snapshot.expenses.iter().map(|e| e.amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::members::Member;
    use crate::payments::Payment;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot_with_member(amount: i64) -> LedgerSnapshot {
        LedgerSnapshot {
            members: vec![Member {
                id: "m1".to_string(),
                name: "Abdul Rahman".to_string(),
                phone: None,
                email: None,
                monthly_amount: Decimal::new(amount, 0),
                joining_date: None,
                address: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_key_depends_on_content_and_date() {
        let settings = LedgerSettings::default();
        let a = ProjectionCache::key_for(&snapshot_with_member(500), &settings, date(2024, 4, 1))
            .unwrap();
        let same =
            ProjectionCache::key_for(&snapshot_with_member(500), &settings, date(2024, 4, 1))
                .unwrap();
        let changed =
            ProjectionCache::key_for(&snapshot_with_member(600), &settings, date(2024, 4, 1))
                .unwrap();
        let later = ProjectionCache::key_for(&snapshot_with_member(500), &settings, date(2024, 5, 1))
            .unwrap();

        assert_eq!(a, same);
        assert_eq!(a.len(), 64);
        assert_ne!(a, changed);
        assert_ne!(a, later);
    }

    #[test]
    fn test_key_depends_on_settings() {
        let snapshot = snapshot_with_member(500);
        let custom = LedgerSettings {
            legacy_identity_matching: false,
            ..Default::default()
        };
        let a = ProjectionCache::key_for(&snapshot, &LedgerSettings::default(), date(2024, 4, 1))
            .unwrap();
        let b = ProjectionCache::key_for(&snapshot, &custom, date(2024, 4, 1)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_sees_digits_beyond_float_precision() {
        let payment = |amount: Decimal| Payment {
            id: "p1".to_string(),
            member_id: Some("m1".to_string()),
            month: "2024-04".parse().ok(),
            amount,
            payment_date: None,
            notes: None,
        };
        let coarse = LedgerSnapshot {
            payments: vec![payment(dec!(0.1))],
            ..Default::default()
        };
        let fine = LedgerSnapshot {
            payments: vec![payment(dec!(0.1000000000000000000000000001))],
            ..Default::default()
        };
        let settings = LedgerSettings::default();
        let as_of = date(2024, 4, 15);
        assert_ne!(
            ProjectionCache::key_for(&coarse, &settings, as_of).unwrap(),
            ProjectionCache::key_for(&fine, &settings, as_of).unwrap()
        );
    }
}
