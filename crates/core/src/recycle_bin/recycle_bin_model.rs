use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result, ValidationError};
use crate::finance::{Expense, MosqueIncome};
use crate::imams::{Imam, ImamPayout};
use crate::members::Member;
use crate::payments::{ImamSalaryPayment, Payment};
use crate::utils::input_format::{deserialize_timestamp, lenient_record};

/// Kind of record held in the recycle bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecycleBinItemType {
    Member,
    Payment,
    Imam,
    #[serde(alias = "imamSalaryPayment", alias = "imam-salary", alias = "imam_salary")]
    ImamSalary,
    #[serde(alias = "imam-payout", alias = "imam_payout")]
    ImamPayout,
    #[serde(alias = "mosqueIncome", alias = "mosque-income")]
    Income,
    Expense,
}

impl RecycleBinItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecycleBinItemType::Member => "member",
            RecycleBinItemType::Payment => "payment",
            RecycleBinItemType::Imam => "imam",
            RecycleBinItemType::ImamSalary => "imamSalary",
            RecycleBinItemType::ImamPayout => "imamPayout",
            RecycleBinItemType::Income => "income",
            RecycleBinItemType::Expense => "expense",
        }
    }
}

impl fmt::Display for RecycleBinItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A soft-deleted record, wrapping the record exactly as it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct RecycleBinItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: RecycleBinItemType,
    #[serde(default)]
    pub original_data: Value,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub deleted_at: Option<DateTime<Utc>>,
}

lenient_record!(RecycleBinItem);

/// Typed view of a recycle-bin item's original data.
#[derive(Debug, Clone, PartialEq)]
pub enum DeletedRecord {
    Member(Member),
    Payment(Payment),
    Imam(Imam),
    ImamSalary(ImamSalaryPayment),
    ImamPayout(ImamPayout),
    Income(MosqueIncome),
    Expense(Expense),
}

impl DeletedRecord {
    pub fn item_type(&self) -> RecycleBinItemType {
        match self {
            DeletedRecord::Member(_) => RecycleBinItemType::Member,
            DeletedRecord::Payment(_) => RecycleBinItemType::Payment,
            DeletedRecord::Imam(_) => RecycleBinItemType::Imam,
            DeletedRecord::ImamSalary(_) => RecycleBinItemType::ImamSalary,
            DeletedRecord::ImamPayout(_) => RecycleBinItemType::ImamPayout,
            DeletedRecord::Income(_) => RecycleBinItemType::Income,
            DeletedRecord::Expense(_) => RecycleBinItemType::Expense,
        }
    }

    /// Id the record had before it was deleted.
    pub fn record_id(&self) -> &str {
        match self {
            DeletedRecord::Member(r) => &r.id,
            DeletedRecord::Payment(r) => &r.id,
            DeletedRecord::Imam(r) => &r.id,
            DeletedRecord::ImamSalary(r) => &r.id,
            DeletedRecord::ImamPayout(r) => &r.id,
            DeletedRecord::Income(r) => &r.id,
            DeletedRecord::Expense(r) => &r.id,
        }
    }
}

impl RecycleBinItem {
    /// Parses `original_data` as the record type named by `item_type`.
    ///
    /// Restoring re-inserts the original data verbatim, so an item that does
    /// not decode should not be restored.
    pub fn decode(&self) -> Result<DeletedRecord> {
        let data = self.original_data.clone();
        let record = match self.item_type {
            RecycleBinItemType::Member => DeletedRecord::Member(self.parse(data)?),
            RecycleBinItemType::Payment => DeletedRecord::Payment(self.parse(data)?),
            RecycleBinItemType::Imam => DeletedRecord::Imam(self.parse(data)?),
            RecycleBinItemType::ImamSalary => DeletedRecord::ImamSalary(self.parse(data)?),
            RecycleBinItemType::ImamPayout => DeletedRecord::ImamPayout(self.parse(data)?),
            RecycleBinItemType::Income => DeletedRecord::Income(self.parse(data)?),
            RecycleBinItemType::Expense => DeletedRecord::Expense(self.parse(data)?),
        };
        Ok(record)
    }

    fn parse<T: serde::de::DeserializeOwned>(&self, data: Value) -> Result<T> {
        serde_json::from_value(data).map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Recycle bin item {} is not a valid {}: {}",
                self.id, self.item_type, e
            )))
        })
    }
}
