//! Imam domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::MonthKey;
use crate::utils::input_format::{
    deserialize_amount, deserialize_date, deserialize_label, deserialize_month,
    deserialize_reference, deserialize_text, lenient_record,
};

/// An imam employed by the masjid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Imam {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub monthly_salary: Decimal,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub joining_date: Option<NaiveDate>,
}

lenient_record!(Imam);

/// A salary payout to an imam for a given month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ImamPayout {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_reference")]
    pub imam_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_month")]
    pub month: Option<MonthKey>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub notes: Option<String>,
}

lenient_record!(ImamPayout);
