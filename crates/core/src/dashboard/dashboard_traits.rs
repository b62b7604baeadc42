use async_trait::async_trait;
use chrono::NaiveDate;

use crate::dashboard::dashboard_model::{DashboardSummary, LedgerSnapshot};
use crate::errors::Result;
use crate::ledger::{ImamLedger, MemberDues};

/// Supplies ledger records, usually by fetching them from the records API.
///
/// Implementations must return a consistent snapshot: all collections read
/// for the same request.
#[async_trait]
pub trait LedgerSourceTrait: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<LedgerSnapshot>;
}

/// Trait for dashboard service operations.
///
/// `as_of` overrides the ledger's current date; `None` means today in the
/// configured timezone.
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    async fn get_dashboard(&self, as_of: Option<NaiveDate>) -> Result<DashboardSummary>;
    async fn get_member_dues(&self, as_of: Option<NaiveDate>) -> Result<Vec<MemberDues>>;
    async fn get_member_dues_by_id(
        &self,
        member_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<MemberDues>;
    async fn get_imam_ledgers(&self, as_of: Option<NaiveDate>) -> Result<Vec<ImamLedger>>;
    async fn get_imam_ledger(&self, imam_id: &str, as_of: Option<NaiveDate>)
        -> Result<ImamLedger>;
}
