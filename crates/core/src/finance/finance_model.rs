//! Income and expense domain models. Both are keyed by date, not by month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::input_format::{
    deserialize_amount, deserialize_date, deserialize_label, deserialize_text, lenient_record,
};

/// Income received outside the member pledge system (donations, events, rent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct MosqueIncome {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub source: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub donor_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: Option<String>,
}

lenient_record!(MosqueIncome);

/// Money spent by the masjid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub purpose: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub paid_to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub notes: Option<String>,
}

lenient_record!(Expense);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expense_with_null_category() {
        let json = r#"[{"_id": "e1", "purpose": "Rent", "category": null, "amount": 100,
            "date": "2024-01-01", "paidTo": null, "paymentMethod": null, "notes": null}]"#;
        let expenses: Vec<Expense> = serde_json::from_str(json).unwrap();
        assert_eq!(expenses[0].category, "");
        assert_eq!(expenses[0].purpose, "Rent");
        assert_eq!(expenses[0].amount, dec!(100));
        assert!(expenses[0].paid_to.is_none());
        assert!(expenses[0].payment_method.is_none());
    }

    #[test]
    fn test_income_with_null_and_numeric_text() {
        let json = r#"[{"_id": "in1", "id": "in1", "source": null, "category": null,
            "amount": "2500", "date": "2024-02-02", "donorName": null,
            "mobileNumber": 9876543210, "description": null}]"#;
        let incomes: Vec<MosqueIncome> = serde_json::from_str(json).unwrap();
        let income = &incomes[0];
        assert_eq!(income.id, "in1");
        assert_eq!(income.source, "");
        assert_eq!(income.category, "");
        assert!(income.donor_name.is_none());
        assert_eq!(income.mobile_number.as_deref(), Some("9876543210"));
        assert!(income.description.is_none());
    }
}
