//! Record endpoints and the ledger snapshot.

use async_trait::async_trait;
use futures::try_join;
use log::debug;
use masjid_core::dashboard::{LedgerSnapshot, LedgerSourceTrait};
use masjid_core::errors::Result;
use masjid_core::finance::{Expense, MosqueIncome};
use masjid_core::imams::{Imam, ImamPayout};
use masjid_core::members::Member;
use masjid_core::payments::{ImamSalaryPayment, Payment};

use crate::client::MasjidApiClient;

impl MasjidApiClient {
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.get("/members").await
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.get("/payments").await
    }

    pub async fn list_imams(&self) -> Result<Vec<Imam>> {
        self.get("/imams").await
    }

    pub async fn list_imam_salary_payments(&self) -> Result<Vec<ImamSalaryPayment>> {
        self.get("/imam-salary").await
    }

    pub async fn list_imam_payouts(&self) -> Result<Vec<ImamPayout>> {
        self.get("/imam-payouts").await
    }

    pub async fn list_mosque_income(&self) -> Result<Vec<MosqueIncome>> {
        self.get("/income").await
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.get("/expenses").await
    }
}

#[async_trait]
impl LedgerSourceTrait for MasjidApiClient {
    /// Fetches all seven collections concurrently; any failure fails the snapshot.
    async fn fetch_snapshot(&self) -> Result<LedgerSnapshot> {
        let (members, payments, imams, imam_salary_payments, imam_payouts, mosque_income, expenses) = try_join!(
            self.list_members(),
            self.list_payments(),
            self.list_imams(),
            self.list_imam_salary_payments(),
            self.list_imam_payouts(),
            self.list_mosque_income(),
            self.list_expenses(),
        )?;

        debug!(
            "[MasjidApi] Snapshot: {} members, {} payments, {} imams, {} salary payments, {} payouts, {} income, {} expenses",
            members.len(),
            payments.len(),
            imams.len(),
            imam_salary_payments.len(),
            imam_payouts.len(),
            mosque_income.len(),
            expenses.len()
        );

        Ok(LedgerSnapshot {
            members,
            payments,
            imams,
            imam_salary_payments,
            imam_payouts,
            mosque_income,
            expenses,
        })
    }
}
