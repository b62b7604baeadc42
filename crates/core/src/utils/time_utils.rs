use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default timezone for ledger dates.
/// "Today" for dues and this-month totals is the calendar date in the
/// masjid's local timezone, not in UTC.
pub const DEFAULT_LEDGER_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Converts a UTC instant to the ledger's calendar date in the given timezone.
///
/// Every "today" the ledger sees should come through here so that late-night
/// UTC instants do not land in the wrong month.
pub fn ledger_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's ledger date in `tz`, read from the system clock.
pub fn ledger_date_today(tz: Tz) -> NaiveDate {
    ledger_date_from_utc(Utc::now(), tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_late_utc_evening_is_next_day_in_kolkata() {
        // 20:00 UTC on 31 March is 01:30 on 1 April in India
        let instant = Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
        assert_eq!(
            ledger_date_from_utc(instant, DEFAULT_LEDGER_TZ),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert_eq!(
            ledger_date_from_utc(instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }
}
