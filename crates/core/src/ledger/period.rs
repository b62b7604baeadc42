//! Period aggregation: grouping money by calendar month.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::UNCATEGORIZED;
use crate::finance::{Expense, MosqueIncome};
use crate::imams::ImamPayout;
use crate::month::MonthKey;
use crate::payments::{ImamSalaryPayment, Payment};

pub use crate::month::enumerate_months;

/// A record that carries money and (maybe) a month it belongs to.
pub trait LedgerEntry {
    fn amount(&self) -> Decimal;

    /// Month the record is booked in; `None` excludes it from monthly views.
    fn period(&self) -> Option<MonthKey>;

    fn category(&self) -> Option<&str> {
        None
    }
}

impl<T: LedgerEntry + ?Sized> LedgerEntry for &T {
    fn amount(&self) -> Decimal {
        (**self).amount()
    }

    fn period(&self) -> Option<MonthKey> {
        (**self).period()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }
}

impl LedgerEntry for Payment {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn period(&self) -> Option<MonthKey> {
        self.month
    }
}

impl LedgerEntry for ImamSalaryPayment {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn period(&self) -> Option<MonthKey> {
        self.month
    }
}

impl LedgerEntry for ImamPayout {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn period(&self) -> Option<MonthKey> {
        self.month
    }
}

impl LedgerEntry for MosqueIncome {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn period(&self) -> Option<MonthKey> {
        self.date.map(MonthKey::from_date)
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
}

impl LedgerEntry for Expense {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn period(&self) -> Option<MonthKey> {
        self.date.map(MonthKey::from_date)
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
}

/// One month of a trailing series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: MonthKey,
    /// Abbreviated month name, for chart axes.
    pub label: String,
    pub amount: Decimal,
}

/// Sums amounts per month. `selector` returns the month and amount of a
/// record, or `None` to skip it (e.g. when its month is unparsable).
pub fn aggregate_by_month<T, F>(records: &[T], selector: F) -> BTreeMap<MonthKey, Decimal>
where
    F: Fn(&T) -> Option<(MonthKey, Decimal)>,
{
    let mut totals = BTreeMap::new();
    for (month, amount) in records.iter().filter_map(selector) {
        let total = totals.entry(month).or_insert(Decimal::ZERO);
        *total = add_amounts(*total, amount);
    }
    totals
}

/// Per-month totals of any ledger entry type.
pub fn monthly_totals<T: LedgerEntry>(records: &[T]) -> BTreeMap<MonthKey, Decimal> {
    aggregate_by_month(records, |r| r.period().map(|m| (m, r.amount())))
}

/// Adds two amounts, pinning at `Decimal::MAX`/`Decimal::MIN` instead of
/// panicking when the records hold absurdly large values.
pub fn add_amounts(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_add(b)
}

/// Subtracts `b` from `a` with the same saturation as [`add_amounts`].
pub fn sub_amounts(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_sub(b)
}

/// Sum of raw amounts, regardless of month.
pub fn sum_amounts<'a, T, I>(records: I) -> Decimal
where
    T: LedgerEntry + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .map(LedgerEntry::amount)
        .fold(Decimal::ZERO, add_amounts)
}

/// Sum of the records booked in `month`.
pub fn total_for_month<T: LedgerEntry>(records: &[T], month: MonthKey) -> Decimal {
    sum_amounts(records.iter().filter(|r| r.period() == Some(month)))
}

/// The `count` months ending with the month of `today`, oldest first.
pub fn trailing_months(today: NaiveDate, count: u32) -> Vec<MonthKey> {
    if count == 0 {
        return Vec::new();
    }
    let current = MonthKey::from_date(today);
    let span = i32::try_from(count - 1).unwrap_or(i32::MAX);
    MonthKey::range(current.offset(-span), current)
}

/// Projects per-month totals onto a trailing window; months without records are zero.
pub fn trailing_series(
    totals: &BTreeMap<MonthKey, Decimal>,
    today: NaiveDate,
    count: u32,
) -> Vec<MonthlyPoint> {
    trailing_months(today, count)
        .into_iter()
        .map(|month| MonthlyPoint {
            month,
            label: month.label().to_string(),
            amount: totals.get(&month).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Totals per category; records without a category are grouped as "Uncategorized".
pub fn breakdown_by_category<T: LedgerEntry>(records: &[T]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for record in records {
        let category = record
            .category()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let total = totals
            .entry(category.to_string())
            .or_insert(Decimal::ZERO);
        *total = add_amounts(*total, record.amount());
    }
    totals
}
