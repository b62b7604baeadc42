//! Balance engine: overall and ring-fenced imam salary fund balances.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::balance_model::{BalanceInputs, BalanceSummary, LedgerTotals, MonthlyFlow};
use super::period::{
    add_amounts, breakdown_by_category, monthly_totals, sub_amounts, sum_amounts, trailing_months,
    LedgerEntry,
};
use crate::month::MonthKey;
use crate::payments::ImamSalaryPayment;
use crate::settings::LedgerSettings;

/// Computes all-time, current-month and trailing monthly balances as of `today`.
///
/// Imam-salary contributions booked before the configured cutoff, or without
/// a month at all, are left out of every figure.
pub fn compute_balance(
    inputs: BalanceInputs<'_>,
    today: NaiveDate,
    settings: &LedgerSettings,
) -> BalanceSummary {
    let current_month = MonthKey::from_date(today);
    let cutoff = settings.imam_salary_cutoff;
    let eligible_salary: Vec<&ImamSalaryPayment> = inputs
        .imam_salary_payments
        .iter()
        .filter(|p| p.month.is_some_and(|m| m >= cutoff))
        .collect();

    let all_time = totals(&inputs, &eligible_salary, |_| true);
    let this_month = totals(&inputs, &eligible_salary, |period| {
        period == Some(current_month)
    });

    BalanceSummary {
        as_of: today,
        current_month,
        imam_salary_cutoff: cutoff,
        all_time,
        this_month,
        monthly: monthly_flows(&inputs, &eligible_salary, today, settings.trailing_months),
        income_by_category: breakdown_by_category(inputs.mosque_income),
        expenses_by_category: breakdown_by_category(inputs.expenses),
    }
}

fn totals<F>(
    inputs: &BalanceInputs<'_>,
    eligible_salary: &[&ImamSalaryPayment],
    include: F,
) -> LedgerTotals
where
    F: Fn(Option<MonthKey>) -> bool,
{
    let general_payments = window_sum(inputs.payments, &include);
    let imam_salary = window_sum(eligible_salary, &include);
    let mosque_income = window_sum(inputs.mosque_income, &include);
    let expenses = window_sum(inputs.expenses, &include);
    let imam_payouts = window_sum(inputs.imam_payouts, &include);

    let total_income = add_amounts(add_amounts(general_payments, imam_salary), mosque_income);
    let total_expenses = add_amounts(expenses, imam_payouts);

    LedgerTotals {
        general_payments,
        imam_salary,
        mosque_income,
        expenses,
        imam_payouts,
        total_income,
        total_expenses,
        remaining_balance: sub_amounts(total_income, total_expenses),
        net_imam_salary_fund: sub_amounts(imam_salary, imam_payouts),
    }
}

fn window_sum<T, F>(records: &[T], include: &F) -> Decimal
where
    T: LedgerEntry,
    F: Fn(Option<MonthKey>) -> bool,
{
    sum_amounts(records.iter().filter(|r| include(r.period())))
}

fn monthly_flows(
    inputs: &BalanceInputs<'_>,
    eligible_salary: &[&ImamSalaryPayment],
    today: NaiveDate,
    count: u32,
) -> Vec<MonthlyFlow> {
    let income = [
        monthly_totals(inputs.payments),
        monthly_totals(eligible_salary),
        monthly_totals(inputs.mosque_income),
    ];
    let outgoing = [
        monthly_totals(inputs.expenses),
        monthly_totals(inputs.imam_payouts),
    ];

    trailing_months(today, count)
        .into_iter()
        .map(|month| {
            let income = income
                .iter()
                .filter_map(|t| t.get(&month))
                .fold(Decimal::ZERO, |acc, v| add_amounts(acc, *v));
            let expenses = outgoing
                .iter()
                .filter_map(|t| t.get(&month))
                .fold(Decimal::ZERO, |acc, v| add_amounts(acc, *v));
            MonthlyFlow {
                month,
                label: month.label().to_string(),
                income,
                expenses,
                net: sub_amounts(income, expenses),
            }
        })
        .collect()
}
