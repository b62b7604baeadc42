//! Property-based integration tests for the ledger engine.
//!
//! These tests check properties that must hold for any input, using the
//! `proptest` crate for random test case generation.

use chrono::NaiveDate;
use masjid_core::imams::{Imam, ImamPayout};
use masjid_core::ledger::{
    compute_balance, compute_dues, compute_imam_ledger, enumerate_months, BalanceInputs,
};
use masjid_core::members::Member;
use masjid_core::payments::{ImamSalaryPayment, Payment};
use masjid_core::settings::LedgerSettings;
use masjid_core::MonthKey;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Generates a calendar date between 2019 and 2026.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2019i32..=2026, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_month() -> impl Strategy<Value = MonthKey> {
    arb_date().prop_map(MonthKey::from_date)
}

/// Money with two decimal places, up to 10,000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_payment() -> impl Strategy<Value = Payment> {
    (
        prop_oneof![Just("m1"), Just("m2")],
        proptest::option::of(arb_month()),
        arb_amount(),
    )
        .prop_map(|(member_id, month, amount)| Payment {
            id: format!("p-{}", amount),
            member_id: Some(member_id.to_string()),
            month,
            amount,
            payment_date: None,
            notes: None,
        })
}

fn arb_salary_payment() -> impl Strategy<Value = ImamSalaryPayment> {
    (proptest::option::of(arb_month()), arb_amount()).prop_map(|(month, amount)| {
        ImamSalaryPayment {
            id: format!("s-{}", amount),
            member_id: None,
            member_name: Some("Abdul Rahman".to_string()),
            member_phone: None,
            month,
            amount,
            payment_date: None,
            notes: None,
        }
    })
}

fn arb_payout() -> impl Strategy<Value = ImamPayout> {
    (arb_month(), arb_amount()).prop_map(|(month, amount)| ImamPayout {
        id: format!("o-{}", amount),
        imam_id: Some("i1".to_string()),
        month: Some(month),
        amount,
        payment_date: None,
        notes: None,
    })
}

fn member(monthly_amount: Decimal, joining_date: NaiveDate) -> Member {
    Member {
        id: "m1".to_string(),
        name: "Abdul Rahman".to_string(),
        phone: None,
        email: None,
        monthly_amount,
        joining_date: Some(joining_date),
        address: None,
    }
}

/// Deterministic permutation driven by a seed.
fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    let len = out.len();
    if len < 2 {
        return out;
    }
    let mut state = seed | 1;
    for i in (1..len).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.swap(i, (state % (i as u64 + 1)) as usize);
    }
    out
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Month enumeration has one entry per calendar month, inclusive.
    #[test]
    fn prop_enumerate_months_length(start in arb_date(), end in arb_date()) {
        let months = enumerate_months(start, end);
        if start > end {
            prop_assert!(months.is_empty());
        } else {
            let s = MonthKey::from_date(start);
            let e = MonthKey::from_date(end);
            let expected = (e.year() - s.year()) * 12 + (e.month() as i32 - s.month() as i32) + 1;
            prop_assert_eq!(months.len() as i32, expected);
            prop_assert!(months.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Dues do not depend on the order payments arrive in.
    #[test]
    fn prop_dues_invariant_under_reordering(
        payments in proptest::collection::vec(arb_payment(), 0..30),
        salary in proptest::collection::vec(arb_salary_payment(), 0..10),
        pledge in arb_amount(),
        joined in arb_date(),
        today in arb_date(),
        seed in any::<u64>(),
    ) {
        let settings = LedgerSettings::default();
        let m = member(pledge, joined);
        let a = compute_dues(&m, &payments, &salary, today, &settings);
        let b = compute_dues(
            &m,
            &shuffled(&payments, seed),
            &shuffled(&salary, seed.rotate_left(7)),
            today,
            &settings,
        );
        prop_assert_eq!(a, b);
    }

    /// Balance totals do not depend on input order.
    #[test]
    fn prop_balance_invariant_under_reordering(
        payments in proptest::collection::vec(arb_payment(), 0..30),
        salary in proptest::collection::vec(arb_salary_payment(), 0..30),
        payouts in proptest::collection::vec(arb_payout(), 0..30),
        today in arb_date(),
        seed in any::<u64>(),
    ) {
        let settings = LedgerSettings::default();
        let a = compute_balance(
            BalanceInputs {
                payments: &payments,
                imam_salary_payments: &salary,
                imam_payouts: &payouts,
                ..Default::default()
            },
            today,
            &settings,
        );
        let (p, s, o) = (
            shuffled(&payments, seed),
            shuffled(&salary, seed ^ 0xA5A5),
            shuffled(&payouts, seed ^ 0x5A5A),
        );
        let b = compute_balance(
            BalanceInputs {
                payments: &p,
                imam_salary_payments: &s,
                imam_payouts: &o,
                ..Default::default()
            },
            today,
            &settings,
        );
        prop_assert_eq!(&a.all_time, &b.all_time);
        prop_assert_eq!(&a.this_month, &b.this_month);
        prop_assert_eq!(a.all_time.remaining_balance, a.all_time.total_income - a.all_time.total_expenses);
    }

    /// Identical inputs and "today" give byte-identical output.
    #[test]
    fn prop_projections_are_idempotent(
        payments in proptest::collection::vec(arb_payment(), 0..20),
        payouts in proptest::collection::vec(arb_payout(), 0..20),
        pledge in arb_amount(),
        joined in arb_date(),
        today in arb_date(),
    ) {
        let settings = LedgerSettings::default();
        let m = member(pledge, joined);
        let first = serde_json::to_string(&compute_dues(&m, &payments, &[], today, &settings)).unwrap();
        let second = serde_json::to_string(&compute_dues(&m, &payments, &[], today, &settings)).unwrap();
        prop_assert_eq!(first, second);

        let imam = Imam {
            id: "i1".to_string(),
            name: "Imam".to_string(),
            mobile: None,
            email: None,
            monthly_salary: pledge,
            joining_date: Some(joined),
        };
        let first = serde_json::to_string(&compute_imam_ledger(&imam, &payouts, today, &settings)).unwrap();
        let second = serde_json::to_string(&compute_imam_ledger(&imam, &payouts, today, &settings)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// A zero pledge never yields paid months.
    #[test]
    fn prop_zero_pledge_has_no_paid_months(
        payments in proptest::collection::vec(arb_payment(), 0..20),
        joined in arb_date(),
        today in arb_date(),
    ) {
        let dues = compute_dues(
            &member(Decimal::ZERO, joined),
            &payments,
            &[],
            today,
            &LedgerSettings::default(),
        );
        prop_assert_eq!(dues.figures.months_paid, 0);
        prop_assert_eq!(dues.figures.completion_percentage, 0);
        prop_assert_eq!(dues.figures.pending_months, dues.figures.expected_months);
    }

    /// The pending month list never exceeds the expected months and stays ordered.
    #[test]
    fn prop_pending_list_within_expected_window(
        payments in proptest::collection::vec(arb_payment(), 0..20),
        pledge in arb_amount(),
        joined in arb_date(),
        today in arb_date(),
    ) {
        let dues = compute_dues(&member(pledge, joined), &payments, &[], today, &LedgerSettings::default());
        let f = &dues.figures;
        prop_assert!(f.pending_month_list.len() as u32 <= f.expected_months);
        prop_assert!(f.pending_month_list.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(f.completion_percentage <= 100);
        prop_assert!(f.remaining_amount >= Decimal::ZERO);
    }
}
