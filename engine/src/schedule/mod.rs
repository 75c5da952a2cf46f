//! Round schedule calculator
//!
//! Computes the ordered list of round date-windows for fixed-cadence pools.
//! Birthday pools never use a precomputed schedule; their windows come from
//! participants' birth dates at resolution time.
//!
//! # Critical Invariants
//!
//! 1. **Determinism**: identical inputs always produce the identical sequence
//! 2. **Monotonicity**: round start dates are strictly increasing
//! 3. **Consistent clamping**: monthly stepping preserves day-of-month and
//!    clamps to the last valid day on every round, not just the first
//!    (Jan 31 → Feb 28 → Mar 28 → Apr 28)

use crate::core::date::{add_calendar_month, due_date};
use crate::models::pool::{Frequency, Pool, ValidationError};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date window of one round: the start date and the payment due date
/// (start plus the fixed grace period)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundWindow {
    /// Round number, 1-based
    pub round_number: u32,
    /// First day of the round
    pub start_date: NaiveDate,
    /// Last day payment is accepted without being late
    pub due_date: NaiveDate,
}

/// Compute the full round schedule for a fixed cadence
///
/// Steps: weekly +7 days, biweekly +14 days, monthly +1 calendar month from
/// the previous round's date with day-of-month clamping. `total_rounds == 0`
/// yields an empty schedule, not an error.
///
/// # Errors
/// Returns [`ValidationError::UnsupportedFrequency`] for the birthday cadence
/// and [`ValidationError::DateOutOfRange`] when stepping leaves chrono's
/// representable calendar range.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tanda_core_rs::{compute_schedule, Frequency};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let windows = compute_schedule(start, 3, Frequency::Weekly).unwrap();
///
/// assert_eq!(windows.len(), 3);
/// assert_eq!(windows[1].start_date, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());
/// assert_eq!(windows[1].due_date, NaiveDate::from_ymd_opt(2024, 1, 27).unwrap());
/// ```
pub fn compute_schedule(
    start_date: NaiveDate,
    total_rounds: u32,
    frequency: Frequency,
) -> Result<Vec<RoundWindow>, ValidationError> {
    if frequency.is_birthday() {
        return Err(ValidationError::UnsupportedFrequency { frequency });
    }

    let mut windows = Vec::with_capacity(total_rounds as usize);
    let mut current = start_date;

    for round_number in 1..=total_rounds {
        let due = due_date(current).ok_or(ValidationError::DateOutOfRange)?;
        windows.push(RoundWindow {
            round_number,
            start_date: current,
            due_date: due,
        });

        if round_number < total_rounds {
            current = step(current, frequency).ok_or(ValidationError::DateOutOfRange)?;
        }
    }

    Ok(windows)
}

/// Compute the schedule for a pool, reading its start date and cadence
///
/// # Errors
/// Returns [`ValidationError::MissingStartDate`] when the pool has no start
/// date, plus everything [`compute_schedule`] can return.
pub fn pool_schedule(pool: &Pool) -> Result<Vec<RoundWindow>, ValidationError> {
    let start = pool
        .start_date()
        .ok_or(ValidationError::MissingStartDate {
            frequency: pool.frequency(),
        })?;
    compute_schedule(start, pool.total_rounds(), pool.frequency())
}

fn step(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Biweekly => date.checked_add_days(Days::new(14)),
        Frequency::Monthly => add_calendar_month(date),
        Frequency::Birthday => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_rounds_yields_empty_schedule() {
        let windows = compute_schedule(ymd(2024, 1, 1), 0, Frequency::Weekly).unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn test_birthday_frequency_rejected() {
        let result = compute_schedule(ymd(2024, 1, 1), 5, Frequency::Birthday);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::UnsupportedFrequency {
                frequency: Frequency::Birthday
            }
        );
    }

    #[test]
    fn test_biweekly_steps_fourteen_days() {
        let windows = compute_schedule(ymd(2024, 3, 1), 3, Frequency::Biweekly).unwrap();
        assert_eq!(windows[0].start_date, ymd(2024, 3, 1));
        assert_eq!(windows[1].start_date, ymd(2024, 3, 15));
        assert_eq!(windows[2].start_date, ymd(2024, 3, 29));
    }

    #[test]
    fn test_monthly_clamp_carries_forward() {
        let windows = compute_schedule(ymd(2023, 1, 31), 4, Frequency::Monthly).unwrap();
        assert_eq!(windows[0].start_date, ymd(2023, 1, 31));
        assert_eq!(windows[1].start_date, ymd(2023, 2, 28));
        assert_eq!(windows[2].start_date, ymd(2023, 3, 28));
        assert_eq!(windows[3].start_date, ymd(2023, 4, 28));
    }

    #[test]
    fn test_pool_schedule_reads_pool_fields() {
        let pool = Pool::new(
            "T".to_string(),
            10_000,
            2,
            Frequency::Monthly,
            Some(ymd(2024, 5, 10)),
        )
        .unwrap();
        let windows = pool_schedule(&pool).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].start_date, ymd(2024, 6, 10));
    }
}
