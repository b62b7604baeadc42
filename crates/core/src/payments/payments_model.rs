//! Contribution domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::MonthKey;
use crate::utils::input_format::{
    deserialize_amount, deserialize_date, deserialize_month, deserialize_reference,
    deserialize_text, lenient_record,
};

/// A general contribution toward a member's monthly pledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_reference")]
    pub member_id: Option<String>,
    /// Month the contribution is for; `None` when missing or unparsable.
    #[serde(default, deserialize_with = "deserialize_month")]
    pub month: Option<MonthKey>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub notes: Option<String>,
}

lenient_record!(Payment);

/// A contribution earmarked for the imam's salary.
///
/// Same shape as [`Payment`], except that legacy records may identify the
/// member only by name and phone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ImamSalaryPayment {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_reference")]
    pub member_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub member_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub member_phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_month")]
    pub month: Option<MonthKey>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub notes: Option<String>,
}

lenient_record!(ImamSalaryPayment);
