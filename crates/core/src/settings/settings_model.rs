//! Ledger settings: the constants the computations are parameterised by.

use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IMAM_SALARY_CUTOFF, DEFAULT_JOIN_MONTH, DEFAULT_TRAILING_MONTHS};
use crate::errors::{Error, Result};
use crate::month::MonthKey;
use crate::utils::time_utils::DEFAULT_LEDGER_TZ;

/// Parameters injected into every ledger computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSettings {
    /// Imam-salary contributions for earlier months are left out of every
    /// imam-salary aggregate and of the salary fund.
    pub imam_salary_cutoff: MonthKey,
    /// Start month for members and imams without a joining date.
    pub default_join_month: MonthKey,
    /// Attribute salary contributions without a member id by name and phone.
    pub legacy_identity_matching: bool,
    /// Length of the trailing monthly income/expense series.
    pub trailing_months: u32,
    /// Timezone used to turn "now" into the ledger's current date.
    pub timezone: Tz,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            imam_salary_cutoff: DEFAULT_IMAM_SALARY_CUTOFF,
            default_join_month: DEFAULT_JOIN_MONTH,
            legacy_identity_matching: true,
            trailing_months: DEFAULT_TRAILING_MONTHS,
            timezone: DEFAULT_LEDGER_TZ,
        }
    }
}

/// Raw overrides, typically read from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSettingsUpdate {
    pub imam_salary_cutoff: Option<String>,
    pub default_join_month: Option<String>,
    pub legacy_identity_matching: Option<String>,
    pub trailing_months: Option<String>,
    pub timezone: Option<String>,
}

impl LedgerSettings {
    /// Applies the non-empty overrides in `update`, validating each one.
    pub fn apply(&self, update: &LedgerSettingsUpdate) -> Result<LedgerSettings> {
        let mut settings = self.clone();

        if let Some(raw) = non_empty(&update.imam_salary_cutoff) {
            settings.imam_salary_cutoff = raw.parse().map_err(|_| {
                Error::InvalidConfigValue(format!("imam salary cutoff '{}'", raw))
            })?;
        }
        if let Some(raw) = non_empty(&update.default_join_month) {
            settings.default_join_month = raw.parse().map_err(|_| {
                Error::InvalidConfigValue(format!("default join month '{}'", raw))
            })?;
        }
        if let Some(raw) = non_empty(&update.legacy_identity_matching) {
            settings.legacy_identity_matching = parse_flag(raw).ok_or_else(|| {
                Error::InvalidConfigValue(format!("legacy identity matching '{}'", raw))
            })?;
        }
        if let Some(raw) = non_empty(&update.trailing_months) {
            settings.trailing_months = raw
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=120).contains(n))
                .ok_or_else(|| Error::InvalidConfigValue(format!("trailing months '{}'", raw)))?;
        }
        if let Some(raw) = non_empty(&update.timezone) {
            settings.timezone = Tz::from_str(raw)
                .map_err(|_| Error::InvalidConfigValue(format!("timezone '{}'", raw)))?;
        }

        Ok(settings)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
