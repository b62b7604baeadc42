use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::finance::{Expense, MosqueIncome};
use crate::imams::{Imam, ImamPayout};
use crate::ledger::{BalanceInputs, BalanceSummary, DuesOverview, ImamLedger, MemberDues, MonthlyPoint};
use crate::members::Member;
use crate::payments::{ImamSalaryPayment, Payment};

/// A consistent copy of every record the ledger is computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub members: Vec<Member>,
    pub payments: Vec<Payment>,
    pub imams: Vec<Imam>,
    pub imam_salary_payments: Vec<ImamSalaryPayment>,
    pub imam_payouts: Vec<ImamPayout>,
    pub mosque_income: Vec<MosqueIncome>,
    pub expenses: Vec<Expense>,
}

impl LedgerSnapshot {
    pub fn balance_inputs(&self) -> BalanceInputs<'_> {
        BalanceInputs {
            payments: &self.payments,
            imam_salary_payments: &self.imam_salary_payments,
            imam_payouts: &self.imam_payouts,
            mosque_income: &self.mosque_income,
            expenses: &self.expenses,
        }
    }
}

/// Every projection derived from one snapshot and one `as_of` date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerProjection {
    pub balance: BalanceSummary,
    pub member_dues: Vec<MemberDues>,
    pub imam_ledgers: Vec<ImamLedger>,
    pub dues_overview: DuesOverview,
    /// General payments per month over the trailing window.
    pub payments_by_month: Vec<MonthlyPoint>,
    /// Imam-salary contributions (after the cutoff) per month over the trailing window.
    pub imam_salary_by_month: Vec<MonthlyPoint>,
}

/// Landing-page figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub member_count: usize,
    pub imam_count: usize,
    pub balance: BalanceSummary,
    pub dues_overview: DuesOverview,
    pub payments_by_month: Vec<MonthlyPoint>,
    pub imam_salary_by_month: Vec<MonthlyPoint>,
}
