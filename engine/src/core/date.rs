//! Calendar-date arithmetic
//!
//! All scheduling in the engine works on timezone-less calendar dates
//! (`chrono::NaiveDate`). This module provides the deterministic date helpers
//! shared by the schedule calculator and the round resolver.
//!
//! # Critical Invariants
//!
//! 1. Month stepping preserves day-of-month and clamps to the last valid day
//!    of shorter months (Jan 31 → Feb 28), on every step
//! 2. A birthday occurring today is "occurring today", never rolled to next year
//! 3. Feb 29 birthdays clamp to Feb 28 in non-leap years

use chrono::{Datelike, Days, Months, NaiveDate};

/// Days after a round's start date by which payment is due.
pub const GRACE_PERIOD_DAYS: u64 = 5;

/// Build a date from components, clamping the day to the last valid day of the
/// month (Feb 29 in a non-leap year becomes Feb 28).
///
/// Returns `None` only when the year is outside chrono's representable range.
pub fn clamped_ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
    })
}

/// Step a date forward by one calendar month, clamping to the last valid day
/// when the target month is shorter.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tanda_core_rs::core::date::add_calendar_month;
///
/// let jan_31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(
///     add_calendar_month(jan_31),
///     NaiveDate::from_ymd_opt(2024, 2, 29),
/// );
/// ```
pub fn add_calendar_month(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(1))
}

/// Due date for a round: start date plus the fixed grace period.
pub fn due_date(start: NaiveDate) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(GRACE_PERIOD_DAYS))
}

/// Next occurrence of a birthday as of `today`.
///
/// The occurrence in `today`'s year is used when it falls on or after `today`;
/// a birthday that already passed this year rolls to next year. A birthday
/// falling exactly on `today` is NOT rolled.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tanda_core_rs::core::date::next_birthday_occurrence;
///
/// let birth = NaiveDate::from_ymd_opt(1990, 3, 5).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
///
/// // Same-day counts as occurring today
/// assert_eq!(next_birthday_occurrence(birth, today), today);
///
/// // Already passed: rolls to next year
/// let later = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
/// assert_eq!(
///     next_birthday_occurrence(birth, later),
///     NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
/// );
/// ```
pub fn next_birthday_occurrence(birth_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let month = birth_date.month();
    let day = birth_date.day();

    if let Some(occurrence) = clamped_ymd(today.year(), month, day) {
        if occurrence >= today {
            return occurrence;
        }
    }

    // Year overflow cannot occur within chrono's representable range
    clamped_ymd(today.year() + 1, month, day).unwrap_or(today)
}
