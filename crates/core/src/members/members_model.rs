//! Member domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::input_format::{
    deserialize_amount, deserialize_date, deserialize_label, deserialize_text, lenient_record,
};

/// A registered member and their monthly pledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub email: Option<String>,
    /// Pledge used for all dues math.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub monthly_amount: Decimal,
    /// Anchors the dues calendar; `None` falls back to the configured default month.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub joining_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address: Option<String>,
}

lenient_record!(Member);
