#[cfg(test)]
mod tests {
    use crate::finance::{Expense, MosqueIncome};
    use crate::imams::ImamPayout;
    use crate::ledger::{compute_balance, BalanceInputs};
    use crate::month::MonthKey;
    use crate::payments::{ImamSalaryPayment, Payment};
    use crate::settings::LedgerSettings;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn payment(month: Option<&str>, amount: Decimal) -> Payment {
        Payment {
            id: "p".to_string(),
            member_id: Some("m1".to_string()),
            month: month.map(key),
            amount,
            payment_date: None,
            notes: None,
        }
    }

    fn salary(month: Option<&str>, amount: Decimal) -> ImamSalaryPayment {
        ImamSalaryPayment {
            id: "s".to_string(),
            member_id: Some("m1".to_string()),
            member_name: None,
            member_phone: None,
            month: month.map(key),
            amount,
            payment_date: None,
            notes: None,
        }
    }

    fn payout(month: Option<&str>, amount: Decimal) -> ImamPayout {
        ImamPayout {
            id: "o".to_string(),
            imam_id: Some("i1".to_string()),
            month: month.map(key),
            amount,
            payment_date: None,
            notes: None,
        }
    }

    fn income(on: Option<NaiveDate>, category: &str, amount: Decimal) -> MosqueIncome {
        MosqueIncome {
            id: "in".to_string(),
            source: "Friday collection".to_string(),
            category: category.to_string(),
            amount,
            date: on,
            donor_name: None,
            mobile_number: None,
            description: None,
        }
    }

    fn expense(on: Option<NaiveDate>, category: &str, amount: Decimal) -> Expense {
        Expense {
            id: "ex".to_string(),
            purpose: "Bills".to_string(),
            category: category.to_string(),
            amount,
            date: on,
            paid_to: None,
            payment_method: None,
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        date(2024, 4, 15)
    }

    #[test]
    fn test_overall_and_fund_balances() {
        let payments = vec![
            payment(Some("2024-01"), dec!(6000)),
            payment(Some("2024-02"), dec!(4000)),
        ];
        let salary = vec![
            salary(Some("2020-09"), dec!(1000)),
            salary(Some("2024-03"), dec!(2000)),
        ];
        let incomes = vec![income(Some(date(2024, 2, 2)), "Donation", dec!(2000))];
        let expenses = vec![
            expense(Some(date(2024, 1, 5)), "Utilities", dec!(1500)),
            expense(Some(date(2024, 3, 9)), "Maintenance", dec!(2500)),
        ];
        let payouts = vec![payout(Some("2024-03"), dec!(1000))];

        let summary = compute_balance(
            BalanceInputs {
                payments: &payments,
                imam_salary_payments: &salary,
                imam_payouts: &payouts,
                mosque_income: &incomes,
                expenses: &expenses,
            },
            today(),
            &LedgerSettings::default(),
        );
        let totals = &summary.all_time;

        assert_eq!(totals.total_income, dec!(15000));
        assert_eq!(totals.total_expenses, dec!(5000));
        assert_eq!(totals.remaining_balance, dec!(10000));
        assert_eq!(totals.net_imam_salary_fund, dec!(2000));
        assert!(!summary.is_deficit());
    }

    #[test]
    fn test_salary_before_cutoff_is_excluded_everywhere() {
        let salary = vec![
            salary(Some("2020-08"), dec!(700)),
            salary(Some("2020-09"), dec!(300)),
            salary(None, dec!(50)),
        ];
        let payouts = vec![payout(Some("2020-09"), dec!(100))];

        let summary = compute_balance(
            BalanceInputs {
                imam_salary_payments: &salary,
                imam_payouts: &payouts,
                ..Default::default()
            },
            date(2020, 9, 30),
            &LedgerSettings::default(),
        );

        assert_eq!(summary.all_time.imam_salary, dec!(300));
        assert_eq!(summary.all_time.total_income, dec!(300));
        assert_eq!(summary.all_time.net_imam_salary_fund, dec!(200));
        let august = summary
            .monthly
            .iter()
            .find(|f| f.month == key("2020-08"))
            .unwrap();
        assert_eq!(august.income, Decimal::ZERO);
    }

    #[test]
    fn test_custom_cutoff() {
        let salary = vec![
            salary(Some("2020-09"), dec!(300)),
            salary(Some("2021-01"), dec!(400)),
        ];
        let settings = LedgerSettings {
            imam_salary_cutoff: key("2021-01"),
            ..Default::default()
        };
        let summary = compute_balance(
            BalanceInputs {
                imam_salary_payments: &salary,
                ..Default::default()
            },
            today(),
            &settings,
        );
        assert_eq!(summary.all_time.imam_salary, dec!(400));
        assert_eq!(summary.imam_salary_cutoff, key("2021-01"));
    }

    #[test]
    fn test_negative_balance_is_not_clamped() {
        let payments = vec![payment(Some("2024-04"), dec!(100))];
        let expenses = vec![expense(Some(date(2024, 4, 1)), "Repairs", dec!(350))];
        let payouts = vec![payout(Some("2024-04"), dec!(500))];

        let summary = compute_balance(
            BalanceInputs {
                payments: &payments,
                expenses: &expenses,
                imam_payouts: &payouts,
                ..Default::default()
            },
            today(),
            &LedgerSettings::default(),
        );

        assert_eq!(summary.all_time.remaining_balance, dec!(-750));
        assert_eq!(summary.all_time.net_imam_salary_fund, dec!(-500));
        assert!(summary.is_deficit());
        assert!(summary.all_time.is_salary_fund_deficit());
    }

    #[test]
    fn test_this_month_uses_injected_date() {
        let payments = vec![
            payment(Some("2024-04"), dec!(500)),
            payment(Some("2024-03"), dec!(500)),
            payment(None, dec!(40)),
        ];
        let salary = vec![salary(Some("2024-04"), dec!(200))];
        let incomes = vec![
            income(Some(date(2024, 4, 30)), "Donation", dec!(70)),
            income(Some(date(2023, 4, 10)), "Donation", dec!(1000)),
        ];
        let expenses = vec![expense(Some(date(2024, 4, 2)), "Utilities", dec!(90))];

        let inputs = BalanceInputs {
            payments: &payments,
            imam_salary_payments: &salary,
            mosque_income: &incomes,
            expenses: &expenses,
            ..Default::default()
        };
        let summary = compute_balance(inputs, today(), &LedgerSettings::default());

        assert_eq!(summary.current_month, key("2024-04"));
        assert_eq!(summary.this_month.general_payments, dec!(500));
        assert_eq!(summary.this_month.imam_salary, dec!(200));
        // Same month last year is not this month
        assert_eq!(summary.this_month.mosque_income, dec!(70));
        assert_eq!(summary.this_month.total_income, dec!(770));
        assert_eq!(summary.this_month.remaining_balance, dec!(680));
        // Month-less payments still count all-time
        assert_eq!(summary.all_time.general_payments, dec!(1040));

        let march = compute_balance(inputs, date(2024, 3, 1), &LedgerSettings::default());
        assert_eq!(march.this_month.general_payments, dec!(500));
        assert_eq!(march.this_month.imam_salary, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_flows_and_categories() {
        let payments = vec![payment(Some("2024-02"), dec!(500))];
        let incomes = vec![
            income(Some(date(2024, 4, 1)), "Donation", dec!(300)),
            income(Some(date(2024, 4, 9)), "", dec!(20)),
        ];
        let expenses = vec![expense(Some(date(2024, 2, 14)), "Utilities", dec!(800))];

        let summary = compute_balance(
            BalanceInputs {
                payments: &payments,
                mosque_income: &incomes,
                expenses: &expenses,
                ..Default::default()
            },
            today(),
            &LedgerSettings::default(),
        );

        assert_eq!(summary.monthly.len(), 12);
        assert_eq!(summary.monthly[0].month, key("2023-05"));
        let feb = &summary.monthly[9];
        assert_eq!(feb.label, "Feb");
        assert_eq!(feb.net, dec!(-300));
        let apr = &summary.monthly[11];
        assert_eq!(apr.income, dec!(320));
        assert_eq!(summary.income_by_category["Donation"], dec!(300));
        assert_eq!(summary.income_by_category["Uncategorized"], dec!(20));
        assert_eq!(summary.expenses_by_category["Utilities"], dec!(800));
    }

    #[test]
    fn test_empty_inputs() {
        let summary = compute_balance(
            BalanceInputs::default(),
            today(),
            &LedgerSettings::default(),
        );
        assert_eq!(summary.all_time.remaining_balance, Decimal::ZERO);
        assert!(summary.monthly.iter().all(|f| f.net == Decimal::ZERO));
        assert!(summary.income_by_category.is_empty());
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
        let payments = vec![
            payment(Some("2024-04"), huge),
            payment(Some("2024-04"), huge),
        ];
        let expenses = vec![
            expense(Some(date(2024, 4, 2)), "Utilities", huge),
            expense(Some(date(2024, 4, 3)), "Utilities", huge),
        ];

        let summary = compute_balance(
            BalanceInputs {
                payments: &payments,
                expenses: &expenses,
                ..Default::default()
            },
            today(),
            &LedgerSettings::default(),
        );

        assert_eq!(summary.all_time.general_payments, Decimal::MAX);
        assert_eq!(summary.all_time.total_income, Decimal::MAX);
        assert_eq!(summary.all_time.total_expenses, Decimal::MAX);
        assert_eq!(summary.this_month.total_income, Decimal::MAX);
        let apr = summary.monthly.last().unwrap();
        assert_eq!(apr.income, Decimal::MAX);
        assert_eq!(apr.expenses, Decimal::MAX);
        assert_eq!(summary.expenses_by_category["Utilities"], Decimal::MAX);
    }
}
