use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// Default timezone for valuation dates.
/// Valuations are reported in EUR, so the business date follows Central European time.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::Europe::Paris;

/// Converts a UTC instant to a valuation date in the given timezone.
///
/// This is the single source of truth for converting instants to domain dates.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's business date in the given timezone.
pub fn valuation_date_today(tz: Tz) -> NaiveDate {
    valuation_date_from_utc(Utc::now(), tz)
}

/// The most recent Friday strictly before `date`.
///
/// When `date` is itself a Friday the result is the Friday one week earlier.
pub fn preceding_friday(date: NaiveDate) -> NaiveDate {
    let from_monday = date.weekday().num_days_from_monday() as i64;
    let friday = Weekday::Fri.num_days_from_monday() as i64;
    let mut back = (from_monday - friday).rem_euclid(7);
    if back == 0 {
        back = 7;
    }
    date - Duration::days(back)
}
