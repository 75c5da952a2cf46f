//! Turn assignment allocator
//!
//! Assigns and validates participant turn numbers.
//!
//! - **Fixed-cadence pools**: a person submits a set of desired numbers; the
//!   whole request is validated before anything is created (no partial
//!   allocation on failure). One participant record is created per number,
//!   sharing the submitted identity fields. A single request may claim at
//!   most floor(total_rounds / 2) numbers; the cap is per call, not per
//!   person, so a person may accumulate more across separate registrations.
//! - **Birthday pools**: turn numbers are an automatic chronological ranking
//!   by (birth month, birth day), ties broken by registration timestamp.
//!   Adding or removing a participant re-ranks everyone so the numbers stay a
//!   contiguous 1..N sequence; they are derived views, not stable ids, and
//!   consumers must tolerate renumbering.

use crate::models::participant::Participant;
use crate::models::pool::Pool;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors for turn allocation requests
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("Turn number {turn} is already taken")]
    TurnTaken { turn: u32 },

    #[error("Turn number {turn} is outside 1..={total_rounds}")]
    TurnOutOfRange { turn: u32, total_rounds: u32 },

    #[error("Requested {requested} numbers, at most {cap} allowed per request")]
    SelectionCapExceeded { requested: usize, cap: usize },

    #[error("Operation requires a {expected} pool")]
    FrequencyMismatch { expected: &'static str },

    #[error("Participant {id} not found")]
    ParticipantNotFound { id: String },
}

/// Maximum numbers one allocation request may claim: 50% of the total, floored
pub fn max_selection(total_rounds: u32) -> usize {
    (total_rounds / 2) as usize
}

/// Allocate a set of turn numbers to one person in a fixed-cadence pool
///
/// Validates the full request first: every number must be free and in range,
/// and the request must fit the per-call cap. On success returns one new
/// participant record per requested number; the caller appends them to its
/// participant list. Duplicate numbers in the request are collapsed.
///
/// # Errors
/// [`AllocationError::FrequencyMismatch`] for birthday pools,
/// [`AllocationError::SelectionCapExceeded`], [`AllocationError::TurnOutOfRange`]
/// or [`AllocationError::TurnTaken`] when validation fails. Failed requests
/// allocate nothing.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tanda_core_rs::{allocate_turns, Frequency, Pool};
///
/// let pool = Pool::new(
///     "T".to_string(),
///     10_000,
///     10,
///     Frequency::Weekly,
///     NaiveDate::from_ymd_opt(2024, 1, 1),
/// ).unwrap();
///
/// let created = allocate_turns(&pool, &[], "Maria", "555-0001", &[2, 7]).unwrap();
/// assert_eq!(created.len(), 2);
/// assert_eq!(created[0].turn_number(), 2);
/// assert_eq!(created[1].turn_number(), 7);
/// ```
pub fn allocate_turns(
    pool: &Pool,
    participants: &[Participant],
    name: &str,
    phone: &str,
    requested: &[u32],
) -> Result<Vec<Participant>, AllocationError> {
    if pool.frequency().is_birthday() {
        return Err(AllocationError::FrequencyMismatch {
            expected: "fixed-cadence",
        });
    }

    let requested: BTreeSet<u32> = requested.iter().copied().collect();
    let cap = max_selection(pool.total_rounds());
    if requested.len() > cap {
        return Err(AllocationError::SelectionCapExceeded {
            requested: requested.len(),
            cap,
        });
    }

    let taken: BTreeSet<u32> = participants.iter().map(|p| p.turn_number()).collect();
    for &turn in &requested {
        if turn < 1 || turn > pool.total_rounds() {
            return Err(AllocationError::TurnOutOfRange {
                turn,
                total_rounds: pool.total_rounds(),
            });
        }
        if taken.contains(&turn) {
            return Err(AllocationError::TurnTaken { turn });
        }
    }

    Ok(requested
        .into_iter()
        .map(|turn| {
            Participant::new(
                pool.id().to_string(),
                name.to_string(),
                phone.to_string(),
                turn,
            )
        })
        .collect())
}

/// Register a participant in a birthday pool and re-rank everyone
///
/// The new participant's turn number is its chronological rank by
/// (birth month, birth day, registration timestamp); existing participants
/// after it shift down. Returns the new participant's ID.
///
/// # Errors
/// [`AllocationError::FrequencyMismatch`] for fixed-cadence pools.
pub fn register_birthday_participant(
    pool: &Pool,
    participants: &mut Vec<Participant>,
    name: &str,
    phone: &str,
    birth_date: NaiveDate,
    registered_at: DateTime<Utc>,
) -> Result<String, AllocationError> {
    if !pool.frequency().is_birthday() {
        return Err(AllocationError::FrequencyMismatch {
            expected: "birthday",
        });
    }

    let participant = Participant::new_birthday(
        pool.id().to_string(),
        name.to_string(),
        phone.to_string(),
        birth_date,
        registered_at,
    );
    let id = participant.id().to_string();

    participants.push(participant);
    rerank(participants);

    Ok(id)
}

/// Remove a participant from a birthday pool and re-rank the rest
///
/// Returns the removed record so the caller can cascade ledger cleanup.
///
/// # Errors
/// [`AllocationError::ParticipantNotFound`] when the ID is unknown.
pub fn remove_birthday_participant(
    participants: &mut Vec<Participant>,
    participant_id: &str,
) -> Result<Participant, AllocationError> {
    let index = participants
        .iter()
        .position(|p| p.id() == participant_id)
        .ok_or_else(|| AllocationError::ParticipantNotFound {
            id: participant_id.to_string(),
        })?;

    let removed = participants.remove(index);
    rerank(participants);
    Ok(removed)
}

/// Re-rank birthday participants to a contiguous 1..N sequence
///
/// Ordering is (birth month, birth day, registration timestamp, id); the id
/// makes the ordering total when timestamps collide. Participants keep their
/// position in the slice, only their turn numbers change.
pub fn rerank(participants: &mut [Participant]) {
    let mut order: Vec<usize> = (0..participants.len()).collect();
    order.sort_by_key(|&i| rank_key(&participants[i]));

    for (rank, index) in order.into_iter().enumerate() {
        participants[index].set_turn_number(rank as u32 + 1);
    }
}

fn rank_key(p: &Participant) -> (u32, u32, DateTime<Utc>, String) {
    let (month, day) = p
        .birth_date()
        .map(|b| (b.month(), b.day()))
        .unwrap_or((u32::MAX, u32::MAX));
    (month, day, p.registered_at(), p.id().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pool::Frequency;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn birthday_pool() -> Pool {
        Pool::new("T".to_string(), 10_000, 12, Frequency::Birthday, None).unwrap()
    }

    #[test]
    fn test_duplicate_request_numbers_collapse() {
        let pool = Pool::new(
            "T".to_string(),
            10_000,
            10,
            Frequency::Weekly,
            Some(ymd(2024, 1, 1)),
        )
        .unwrap();
        let created = allocate_turns(&pool, &[], "A", "555", &[3, 3, 4]).unwrap();
        assert_eq!(created.len(), 2);
    }

    #[test]
    fn test_manual_allocation_rejected_for_birthday_pool() {
        let pool = birthday_pool();
        let result = allocate_turns(&pool, &[], "A", "555", &[1]);
        assert_eq!(
            result.unwrap_err(),
            AllocationError::FrequencyMismatch {
                expected: "fixed-cadence"
            }
        );
    }

    #[test]
    fn test_rerank_orders_by_month_day_then_registration() {
        let mut participants = vec![
            Participant::new_birthday(
                "p".to_string(),
                "mar-early".to_string(),
                "555".to_string(),
                ymd(1990, 3, 5),
                at(100),
            ),
            Participant::new_birthday(
                "p".to_string(),
                "jan".to_string(),
                "555".to_string(),
                ymd(1992, 1, 10),
                at(200),
            ),
            Participant::new_birthday(
                "p".to_string(),
                "mar-late".to_string(),
                "555".to_string(),
                ymd(1985, 3, 5),
                at(300),
            ),
        ];

        rerank(&mut participants);

        assert_eq!(participants[0].turn_number(), 2); // Mar 5, registered first
        assert_eq!(participants[1].turn_number(), 1); // Jan 10
        assert_eq!(participants[2].turn_number(), 3); // Mar 5, registered later
    }

    #[test]
    fn test_removal_restores_contiguous_ranking() {
        let pool = birthday_pool();
        let mut participants = Vec::new();
        register_birthday_participant(&pool, &mut participants, "a", "1", ymd(1990, 2, 1), at(1))
            .unwrap();
        let middle_id = register_birthday_participant(
            &pool,
            &mut participants,
            "b",
            "2",
            ymd(1991, 5, 1),
            at(2),
        )
        .unwrap();
        register_birthday_participant(&pool, &mut participants, "c", "3", ymd(1992, 9, 1), at(3))
            .unwrap();

        remove_birthday_participant(&mut participants, &middle_id).unwrap();

        let mut turns: Vec<u32> = participants.iter().map(|p| p.turn_number()).collect();
        turns.sort_unstable();
        assert_eq!(turns, vec![1, 2]);
    }

    #[test]
    fn test_remove_unknown_participant() {
        let mut participants = Vec::new();
        let result = remove_birthday_participant(&mut participants, "nope");
        assert_eq!(
            result.unwrap_err(),
            AllocationError::ParticipantNotFound {
                id: "nope".to_string()
            }
        );
    }
}
