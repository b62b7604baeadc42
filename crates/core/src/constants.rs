use crate::month::MonthKey;

/// First month counted in imam-salary aggregates unless configured otherwise.
pub const DEFAULT_IMAM_SALARY_CUTOFF: MonthKey = match MonthKey::new(2020, 9) {
    Some(month) => month,
    None => panic!("invalid imam salary cutoff"),
};

/// Month used as a member's start when no joining date was recorded.
pub const DEFAULT_JOIN_MONTH: MonthKey = DEFAULT_IMAM_SALARY_CUTOFF;

/// Number of months in the dashboard's trailing income/expense series.
pub const DEFAULT_TRAILING_MONTHS: u32 = 12;

/// Category label for income or expense records without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";
