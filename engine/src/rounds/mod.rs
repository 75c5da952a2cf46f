//! Round resolver
//!
//! Determines which round is active as of a given date. Fixed-cadence pools
//! resolve against the precomputed schedule; birthday pools resolve against
//! each participant's next birthday occurrence.
//!
//! # Boundary Semantics
//!
//! - Fixed cadence: the active round is the highest round whose start date is
//!   on or before `today`. Before round 1 starts, round 1 is still returned
//!   (callers always need a valid round index for display); [`is_upcoming`]
//!   exposes the distinction.
//! - Birthday: a birthday falling exactly on `today` counts as occurring
//!   today, never rolled to next year. When several participants share the
//!   minimum next occurrence, the smallest of their turn numbers is returned
//!   as the representative; the stats module exposes the full concurrent set.
//! - No schedule entries or no birth dates: round 1 as a safe default.

use crate::core::date::next_birthday_occurrence;
use crate::models::participant::Participant;
use crate::models::pool::Pool;
use crate::schedule::pool_schedule;
use chrono::NaiveDate;

/// Resolve the currently active round of a pool
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tanda_core_rs::{current_round, Frequency, Pool};
///
/// let pool = Pool::new(
///     "T".to_string(),
///     10_000,
///     10,
///     Frequency::Weekly,
///     NaiveDate::from_ymd_opt(2024, 1, 1),
/// ).unwrap();
///
/// // 20 days after the start, the third weekly round is active
/// let today = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
/// assert_eq!(current_round(&pool, &[], today), 3);
/// ```
pub fn current_round(pool: &Pool, participants: &[Participant], today: NaiveDate) -> u32 {
    if pool.frequency().is_birthday() {
        current_birthday_round(participants, today)
    } else {
        current_fixed_round(pool, today)
    }
}

/// Whether a fixed-cadence pool has not yet reached its first round
///
/// Always false for birthday pools: their rotation has no fixed start.
pub fn is_upcoming(pool: &Pool, today: NaiveDate) -> bool {
    if pool.frequency().is_birthday() {
        return false;
    }
    match pool.start_date() {
        Some(start) => today < start,
        None => false,
    }
}

fn current_fixed_round(pool: &Pool, today: NaiveDate) -> u32 {
    let windows = match pool_schedule(pool) {
        Ok(windows) if !windows.is_empty() => windows,
        _ => return 1,
    };

    let active = windows
        .iter()
        .take_while(|w| w.start_date <= today)
        .map(|w| w.round_number)
        .last()
        .unwrap_or(1);

    active.clamp(1, pool.total_rounds())
}

fn current_birthday_round(participants: &[Participant], today: NaiveDate) -> u32 {
    participants
        .iter()
        .filter_map(|p| {
            p.birth_date()
                .map(|birth| (next_birthday_occurrence(birth, today), p.turn_number()))
        })
        .min()
        .map(|(_, turn)| turn)
        .unwrap_or(1)
}
