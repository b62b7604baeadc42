//! Output structures of the dues calculators.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::MonthKey;

/// Where a member (or imam) stands against their pledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuesStatus {
    NoPayments,
    FullyPaid {
        #[serde(rename = "advanceMonths")]
        advance_months: u32,
    },
    Pending {
        months: u32,
    },
}

impl DuesStatus {
    /// `NoPayments` wins over every other state, so a member with nothing
    /// expected yet and nothing paid still reads as "No Payments".
    pub fn classify(months_paid: u32, expected_months: u32) -> Self {
        if months_paid == 0 {
            DuesStatus::NoPayments
        } else if months_paid >= expected_months {
            DuesStatus::FullyPaid {
                advance_months: months_paid - expected_months,
            }
        } else {
            DuesStatus::Pending {
                months: expected_months - months_paid,
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            DuesStatus::NoPayments => "No Payments".to_string(),
            DuesStatus::FullyPaid { advance_months: 0 } => "Fully Paid".to_string(),
            DuesStatus::FullyPaid { advance_months } => {
                format!("Fully Paid (+{} months advance)", advance_months)
            }
            DuesStatus::Pending { months } => format!("{} Months Pending", months),
        }
    }
}

impl fmt::Display for DuesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Figures shared by member dues and imam salary ledgers.
///
/// `months_paid` and `pending_months` are amount based: contributions are
/// fungible across months. `pending_month_list` is computed per month and
/// does not have to agree with `pending_months` in count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesFigures {
    pub joining_month: MonthKey,
    pub total_paid: Decimal,
    pub months_paid: u32,
    pub expected_months: u32,
    pub pending_months: u32,
    pub expected_amount: Decimal,
    pub remaining_amount: Decimal,
    pub completion_percentage: u32,
    pub pending_month_list: Vec<MonthKey>,
    pub status: DuesStatus,
    pub status_label: String,
}

/// Dues of a single member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDues {
    pub member_id: String,
    pub member_name: String,
    pub monthly_amount: Decimal,
    #[serde(flatten)]
    pub figures: DuesFigures,
}

/// Salary ledger of a single imam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImamLedger {
    pub imam_id: String,
    pub imam_name: String,
    pub monthly_salary: Decimal,
    #[serde(flatten)]
    pub figures: DuesFigures,
    /// Payouts summed per month they were booked against.
    pub paid_by_month: BTreeMap<MonthKey, Decimal>,
}

/// Counts across a batch of member dues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesOverview {
    pub members: usize,
    pub fully_paid: usize,
    pub with_pending: usize,
    pub no_payments: usize,
    pub total_outstanding: Decimal,
    pub total_pending_months: u64,
}

impl DuesOverview {
    pub fn from_dues(dues: &[MemberDues]) -> Self {
        let mut overview = DuesOverview {
            members: dues.len(),
            ..Default::default()
        };
        for entry in dues {
            match entry.figures.status {
                DuesStatus::NoPayments => overview.no_payments += 1,
                DuesStatus::FullyPaid { .. } => overview.fully_paid += 1,
                DuesStatus::Pending { .. } => overview.with_pending += 1,
            }
            overview.total_outstanding = overview
                .total_outstanding
                .saturating_add(entry.figures.remaining_amount);
            overview.total_pending_months += u64::from(entry.figures.pending_months);
        }
        overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(DuesStatus::classify(0, 4), DuesStatus::NoPayments);
        assert_eq!(DuesStatus::classify(0, 0), DuesStatus::NoPayments);
        assert_eq!(
            DuesStatus::classify(4, 4),
            DuesStatus::FullyPaid { advance_months: 0 }
        );
        assert_eq!(
            DuesStatus::classify(6, 4),
            DuesStatus::FullyPaid { advance_months: 2 }
        );
        assert_eq!(DuesStatus::classify(1, 4), DuesStatus::Pending { months: 3 });
    }

    #[test]
    fn test_labels() {
        assert_eq!(DuesStatus::NoPayments.label(), "No Payments");
        assert_eq!(
            DuesStatus::FullyPaid { advance_months: 0 }.to_string(),
            "Fully Paid"
        );
        assert_eq!(
            DuesStatus::FullyPaid { advance_months: 3 }.label(),
            "Fully Paid (+3 months advance)"
        );
        assert_eq!(DuesStatus::Pending { months: 2 }.label(), "2 Months Pending");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(DuesStatus::FullyPaid { advance_months: 1 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "state": "FULLY_PAID", "advanceMonths": 1 })
        );
        let json = serde_json::to_value(DuesStatus::NoPayments).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "NO_PAYMENTS" }));
    }
}
