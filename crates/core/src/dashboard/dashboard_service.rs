use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use crate::dashboard::dashboard_model::{DashboardSummary, LedgerProjection, LedgerSnapshot};
use crate::dashboard::dashboard_traits::{DashboardServiceTrait, LedgerSourceTrait};
use crate::dashboard::projection_cache::ProjectionCache;
use crate::errors::{Error, Result};
use crate::ledger::{
    compute_all_dues, compute_all_imam_ledgers, compute_balance, monthly_totals, trailing_series,
    DuesOverview, ImamLedger, MemberDues,
};
use crate::payments::ImamSalaryPayment;
use crate::settings::LedgerSettings;
use crate::utils::time_utils::ledger_date_today;

/// Computes every ledger projection of `snapshot` as of `as_of`.
pub fn project_ledger(
    snapshot: &LedgerSnapshot,
    as_of: NaiveDate,
    settings: &LedgerSettings,
) -> LedgerProjection {
    let balance = compute_balance(snapshot.balance_inputs(), as_of, settings);
    let member_dues = compute_all_dues(
        &snapshot.members,
        &snapshot.payments,
        &snapshot.imam_salary_payments,
        as_of,
        settings,
    );
    let imam_ledgers =
        compute_all_imam_ledgers(&snapshot.imams, &snapshot.imam_payouts, as_of, settings);
    let dues_overview = DuesOverview::from_dues(&member_dues);

    let eligible_salary: Vec<&ImamSalaryPayment> = snapshot
        .imam_salary_payments
        .iter()
        .filter(|p| p.month.is_some_and(|m| m >= settings.imam_salary_cutoff))
        .collect();

    LedgerProjection {
        payments_by_month: trailing_series(
            &monthly_totals(&snapshot.payments),
            as_of,
            settings.trailing_months,
        ),
        imam_salary_by_month: trailing_series(
            &monthly_totals(&eligible_salary),
            as_of,
            settings.trailing_months,
        ),
        balance,
        member_dues,
        imam_ledgers,
        dues_overview,
    }
}

/// Service serving ledger projections over a [`LedgerSourceTrait`].
///
/// Records are fetched on every call; the projection is recomputed only when
/// their content, the settings or the `as_of` date changed.
pub struct DashboardService {
    source: Arc<dyn LedgerSourceTrait>,
    settings: LedgerSettings,
    cache: Arc<ProjectionCache>,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn LedgerSourceTrait>,
        settings: LedgerSettings,
        cache: Arc<ProjectionCache>,
    ) -> Self {
        Self {
            source,
            settings,
            cache,
        }
    }

    fn resolve_date(&self, as_of: Option<NaiveDate>) -> NaiveDate {
        as_of.unwrap_or_else(|| ledger_date_today(self.settings.timezone))
    }

    async fn load(&self, as_of: Option<NaiveDate>) -> Result<(LedgerSnapshot, Arc<LedgerProjection>)> {
        let as_of = self.resolve_date(as_of);
        let snapshot = self.source.fetch_snapshot().await?;
        let key = ProjectionCache::key_for(&snapshot, &self.settings, as_of)?;

        if let Some(projection) = self.cache.get(&key).await {
            return Ok((snapshot, projection));
        }

        debug!(
            "Projecting ledger as of {} ({} members, {} payments, {} imams)",
            as_of,
            snapshot.members.len(),
            snapshot.payments.len(),
            snapshot.imams.len()
        );
        let projection = Arc::new(project_ledger(&snapshot, as_of, &self.settings));
        self.cache.insert(key, Arc::clone(&projection)).await;
        Ok((snapshot, projection))
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn get_dashboard(&self, as_of: Option<NaiveDate>) -> Result<DashboardSummary> {
        let (snapshot, projection) = self.load(as_of).await?;
        let balance = projection.balance.clone();
        if balance.is_deficit() {
            info!(
                "Ledger is in deficit as of {}: {}",
                balance.as_of, balance.all_time.remaining_balance
            );
        }
        Ok(DashboardSummary {
            as_of: balance.as_of,
            member_count: snapshot.members.len(),
            imam_count: snapshot.imams.len(),
            balance,
            dues_overview: projection.dues_overview.clone(),
            payments_by_month: projection.payments_by_month.clone(),
            imam_salary_by_month: projection.imam_salary_by_month.clone(),
        })
    }

    async fn get_member_dues(&self, as_of: Option<NaiveDate>) -> Result<Vec<MemberDues>> {
        let (_, projection) = self.load(as_of).await?;
        Ok(projection.member_dues.clone())
    }

    async fn get_member_dues_by_id(
        &self,
        member_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<MemberDues> {
        let (_, projection) = self.load(as_of).await?;
        projection
            .member_dues
            .iter()
            .find(|d| d.member_id == member_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Member {} not found", member_id)))
    }

    async fn get_imam_ledgers(&self, as_of: Option<NaiveDate>) -> Result<Vec<ImamLedger>> {
        let (_, projection) = self.load(as_of).await?;
        Ok(projection.imam_ledgers.clone())
    }

    async fn get_imam_ledger(
        &self,
        imam_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<ImamLedger> {
        let (_, projection) = self.load(as_of).await?;
        projection
            .imam_ledgers
            .iter()
            .find(|l| l.imam_id == imam_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Imam {} not found", imam_id)))
    }
}
