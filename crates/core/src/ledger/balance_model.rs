//! Balance engine inputs and outputs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::finance::{Expense, MosqueIncome};
use crate::imams::ImamPayout;
use crate::month::MonthKey;
use crate::payments::{ImamSalaryPayment, Payment};

/// Borrowed view over the five record streams the balance is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceInputs<'a> {
    pub payments: &'a [Payment],
    pub imam_salary_payments: &'a [ImamSalaryPayment],
    pub imam_payouts: &'a [ImamPayout],
    pub mosque_income: &'a [MosqueIncome],
    pub expenses: &'a [Expense],
}

/// Income, expense and fund totals over some window.
///
/// `imam_salary` only counts contributions on or after the salary cutoff.
/// `remaining_balance` and `net_imam_salary_fund` may be negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub general_payments: Decimal,
    pub imam_salary: Decimal,
    pub mosque_income: Decimal,
    pub expenses: Decimal,
    pub imam_payouts: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub remaining_balance: Decimal,
    pub net_imam_salary_fund: Decimal,
}

impl LedgerTotals {
    pub fn is_deficit(&self) -> bool {
        self.remaining_balance < Decimal::ZERO
    }

    pub fn is_salary_fund_deficit(&self) -> bool {
        self.net_imam_salary_fund < Decimal::ZERO
    }
}

/// Income against expenses for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlow {
    pub month: MonthKey,
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub as_of: NaiveDate,
    pub current_month: MonthKey,
    pub imam_salary_cutoff: MonthKey,
    pub all_time: LedgerTotals,
    pub this_month: LedgerTotals,
    /// Trailing window ending with the current month, oldest first.
    pub monthly: Vec<MonthlyFlow>,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub expenses_by_category: BTreeMap<String, Decimal>,
}

impl BalanceSummary {
    pub fn is_deficit(&self) -> bool {
        self.all_time.is_deficit()
    }
}
