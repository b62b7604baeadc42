//! Member dues and imam salary ledgers.
//!
//! Both follow the same shape: months expected since joining, an
//! amount-based paid count, and a per-month pending list. They differ in how
//! a single month counts as settled. For members any contribution booked
//! against the month settles it; for imams the payouts of the month must
//! reach the full salary.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::attribution::PaymentAttribution;
use super::dues_model::{DuesFigures, DuesStatus, ImamLedger, MemberDues};
use super::period::{add_amounts, monthly_totals, sub_amounts, sum_amounts};
use crate::imams::{Imam, ImamPayout};
use crate::members::Member;
use crate::month::MonthKey;
use crate::payments::{ImamSalaryPayment, Payment};
use crate::settings::LedgerSettings;

/// Computes a member's dues as of `today`.
///
/// `total_paid` counts general payments plus every imam-salary contribution
/// attributable to the member, without the salary cutoff.
pub fn compute_dues(
    member: &Member,
    payments: &[Payment],
    salary_payments: &[ImamSalaryPayment],
    today: NaiveDate,
    settings: &LedgerSettings,
) -> MemberDues {
    let attribution = PaymentAttribution::new(settings.legacy_identity_matching);
    let own_payments = attribution.payments_of(member, payments);
    let own_salary = attribution.salary_payments_of(member, salary_payments);

    let total_paid = add_amounts(
        sum_amounts(own_payments.iter().copied()),
        sum_amounts(own_salary.iter().copied()),
    );

    let paid_months: BTreeSet<MonthKey> = own_payments
        .iter()
        .filter_map(|p| p.month)
        .chain(own_salary.iter().filter_map(|p| p.month))
        .collect();

    let joining_month = joining_month(member.joining_date, settings);
    if member.monthly_amount <= Decimal::ZERO {
        debug!(
            "Member {} has a non-positive monthly amount; dues figures are zero",
            member.id
        );
    }

    let figures = settle(
        joining_month,
        MonthKey::from_date(today),
        member.monthly_amount,
        total_paid,
        |month| paid_months.contains(&month),
    );

    MemberDues {
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        monthly_amount: member.monthly_amount,
        figures,
    }
}

/// Computes an imam's salary ledger as of `today`.
///
/// A month is settled only when the payouts booked against it add up to at
/// least the monthly salary.
pub fn compute_imam_ledger(
    imam: &Imam,
    payouts: &[ImamPayout],
    today: NaiveDate,
    settings: &LedgerSettings,
) -> ImamLedger {
    let own: Vec<&ImamPayout> = payouts
        .iter()
        .filter(|p| p.imam_id.as_deref() == Some(imam.id.as_str()))
        .collect();

    let total_paid = sum_amounts(own.iter().copied());
    let paid_by_month = monthly_totals(&own);
    let salary = imam.monthly_salary;

    let figures = settle(
        joining_month(imam.joining_date, settings),
        MonthKey::from_date(today),
        salary,
        total_paid,
        |month| {
            salary > Decimal::ZERO
                && paid_by_month
                    .get(&month)
                    .is_some_and(|paid| *paid >= salary)
        },
    );

    ImamLedger {
        imam_id: imam.id.clone(),
        imam_name: imam.name.clone(),
        monthly_salary: salary,
        figures,
        paid_by_month,
    }
}

/// Dues of every member, in input order.
pub fn compute_all_dues(
    members: &[Member],
    payments: &[Payment],
    salary_payments: &[ImamSalaryPayment],
    today: NaiveDate,
    settings: &LedgerSettings,
) -> Vec<MemberDues> {
    members
        .iter()
        .map(|member| compute_dues(member, payments, salary_payments, today, settings))
        .collect()
}

/// Salary ledgers of every imam, in input order.
pub fn compute_all_imam_ledgers(
    imams: &[Imam],
    payouts: &[ImamPayout],
    today: NaiveDate,
    settings: &LedgerSettings,
) -> Vec<ImamLedger> {
    imams
        .iter()
        .map(|imam| compute_imam_ledger(imam, payouts, today, settings))
        .collect()
}

fn joining_month(joining_date: Option<NaiveDate>, settings: &LedgerSettings) -> MonthKey {
    joining_date
        .map(MonthKey::from_date)
        .unwrap_or(settings.default_join_month)
}

fn settle<F>(
    joining_month: MonthKey,
    current_month: MonthKey,
    pledge: Decimal,
    total_paid: Decimal,
    is_settled: F,
) -> DuesFigures
where
    F: Fn(MonthKey) -> bool,
{
    let expected_months = joining_month.months_through(current_month);
    let months_paid = months_covered(total_paid, pledge);
    let pending_months = expected_months.saturating_sub(months_paid);

    let expected_amount = if pledge > Decimal::ZERO {
        pledge
            .checked_mul(Decimal::from(expected_months))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    let remaining_amount = sub_amounts(expected_amount, total_paid).max(Decimal::ZERO);

    let pending_month_list = MonthKey::range(joining_month, current_month)
        .into_iter()
        .filter(|month| !is_settled(*month))
        .collect();

    let status = DuesStatus::classify(months_paid, expected_months);

    DuesFigures {
        joining_month,
        total_paid,
        months_paid,
        expected_months,
        pending_months,
        expected_amount,
        remaining_amount,
        completion_percentage: completion_percentage(months_paid, expected_months),
        pending_month_list,
        status,
        status_label: status.label(),
    }
}

/// Whole pledge months covered by `total_paid`.
fn months_covered(total_paid: Decimal, pledge: Decimal) -> u32 {
    if pledge <= Decimal::ZERO || total_paid <= Decimal::ZERO {
        return 0;
    }
    total_paid
        .checked_div(pledge)
        .and_then(|ratio| ratio.floor().to_u32())
        .unwrap_or(u32::MAX)
}

fn completion_percentage(months_paid: u32, expected_months: u32) -> u32 {
    if expected_months == 0 {
        return 0;
    }
    let ratio = Decimal::from(months_paid) * Decimal::ONE_HUNDRED / Decimal::from(expected_months);
    ratio
        .min(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
