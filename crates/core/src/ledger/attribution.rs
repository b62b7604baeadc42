//! Matching contribution records to the member who made them.

use crate::members::Member;
use crate::payments::{ImamSalaryPayment, Payment};

/// Decides which contributions belong to a member.
///
/// General payments always carry a member id. Imam-salary payments from
/// before member ids were normalized may only carry the member's name and
/// phone; with `legacy_identity_matching` enabled those fall back to an exact
/// name + phone match, or a name-only match when the record has no phone.
#[derive(Debug, Clone, Copy)]
pub struct PaymentAttribution {
    legacy_identity_matching: bool,
}

impl PaymentAttribution {
    pub fn new(legacy_identity_matching: bool) -> Self {
        Self {
            legacy_identity_matching,
        }
    }

    pub fn owns_payment(&self, member: &Member, payment: &Payment) -> bool {
        payment.member_id.as_deref() == Some(member.id.as_str())
    }

    pub fn owns_salary_payment(&self, member: &Member, payment: &ImamSalaryPayment) -> bool {
        if let Some(member_id) = payment.member_id.as_deref() {
            return member_id == member.id;
        }
        if !self.legacy_identity_matching {
            return false;
        }

        let Some(name) = payment.member_name.as_deref() else {
            return false;
        };
        if name != member.name {
            return false;
        }
        match payment.member_phone.as_deref() {
            Some(phone) => member.phone.as_deref() == Some(phone),
            None => true,
        }
    }

    pub fn payments_of<'a>(&self, member: &Member, payments: &'a [Payment]) -> Vec<&'a Payment> {
        payments
            .iter()
            .filter(|p| self.owns_payment(member, p))
            .collect()
    }

    pub fn salary_payments_of<'a>(
        &self,
        member: &Member,
        payments: &'a [ImamSalaryPayment],
    ) -> Vec<&'a ImamSalaryPayment> {
        payments
            .iter()
            .filter(|p| self.owns_salary_payment(member, p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn member() -> Member {
        Member {
            id: "m1".to_string(),
            name: "Abdul Rahman".to_string(),
            phone: Some("9876543210".to_string()),
            email: None,
            monthly_amount: Decimal::new(500, 0),
            joining_date: None,
            address: None,
        }
    }

    fn salary(id: Option<&str>, name: Option<&str>, phone: Option<&str>) -> ImamSalaryPayment {
        ImamSalaryPayment {
            id: "s".to_string(),
            member_id: id.map(str::to_string),
            member_name: name.map(str::to_string),
            member_phone: phone.map(str::to_string),
            month: None,
            amount: Decimal::ZERO,
            payment_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_member_id_wins_over_name() {
        let attribution = PaymentAttribution::new(true);
        let m = member();
        assert!(attribution.owns_salary_payment(&m, &salary(Some("m1"), Some("Someone"), None)));
        // A record that names the member but points at another id is not theirs
        assert!(!attribution.owns_salary_payment(
            &m,
            &salary(Some("m2"), Some("Abdul Rahman"), Some("9876543210"))
        ));
    }

    #[test]
    fn test_name_and_phone_fallback() {
        let attribution = PaymentAttribution::new(true);
        let m = member();
        assert!(attribution.owns_salary_payment(
            &m,
            &salary(None, Some("Abdul Rahman"), Some("9876543210"))
        ));
        assert!(!attribution.owns_salary_payment(
            &m,
            &salary(None, Some("Abdul Rahman"), Some("1111111111"))
        ));
    }

    #[test]
    fn test_name_only_fallback_when_phone_absent() {
        let attribution = PaymentAttribution::new(true);
        let m = member();
        assert!(attribution.owns_salary_payment(&m, &salary(None, Some("Abdul Rahman"), None)));
        assert!(!attribution.owns_salary_payment(&m, &salary(None, Some("abdul rahman"), None)));
        assert!(!attribution.owns_salary_payment(&m, &salary(None, None, None)));
    }

    #[test]
    fn test_fallback_disabled() {
        let attribution = PaymentAttribution::new(false);
        let m = member();
        assert!(attribution.owns_salary_payment(&m, &salary(Some("m1"), None, None)));
        assert!(!attribution.owns_salary_payment(
            &m,
            &salary(None, Some("Abdul Rahman"), Some("9876543210"))
        ));
    }
}
