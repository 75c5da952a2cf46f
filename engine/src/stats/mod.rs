//! Aggregation engine
//!
//! Derives display-ready statistics from a pool, its participant list, and
//! the payment ledger. Everything here is a pure read: callers can run these
//! in parallel with each other.
//!
//! For birthday pools, a round's beneficiary set is every participant sharing
//! the round holder's (month, day) — simultaneous birthdays make all of them
//! concurrently active. The resolver collapses that set to one representative
//! turn number; this module is where the full set is exposed.

use crate::core::date::{due_date, next_birthday_occurrence};
use crate::ledger::PaymentLedger;
use crate::models::participant::Participant;
use crate::models::pool::Pool;
use crate::rounds::current_round;
use crate::schedule::pool_schedule;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for statistics queries
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Round {round} is outside 1..={total_rounds}")]
    RoundOutOfRange { round: u32, total_rounds: u32 },

    #[error("Participant {id} not found")]
    ParticipantNotFound { id: String },

    #[error("No participant holds turn number {round}")]
    NoRoundHolder { round: u32 },
}

/// Per-round collection statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    /// Round these stats describe
    pub round_number: u32,
    /// Contributors who have paid
    pub paid_count: u32,
    /// Contributors still pending
    pub pending_count: u32,
    /// Sum of paid, non-exempt amounts (i64 cents)
    pub amount_collected: i64,
    /// Contribution × number of expected contributors (i64 cents)
    pub amount_expected: i64,
    /// Collection percentage, 0.0 when nothing is expected
    pub percent: f64,
}

/// Whether a participant is keeping up with the rounds due so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Paid at least as many rounds as have come due
    UpToDate,
    /// Fewer payments than rounds due
    Behind,
}

/// One participant's payment standing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStanding {
    /// Up to date or behind
    pub status: Standing,
    /// Rounds whose due date has already passed
    pub payments_expected: u32,
    /// Rounds this participant has paid
    pub payments_made: u32,
    /// Payments for rounds beyond the current one
    pub payments_ahead: u32,
}

/// Collection statistics for one round
///
/// Fixed cadence: every non-exempt participant is a contributor. Birthday:
/// everyone but the round's beneficiaries contributes, once per concurrent
/// beneficiary, and collected amounts are summed across all the concurrent
/// beneficiaries' rounds.
///
/// # Errors
/// [`StatsError::RoundOutOfRange`], or [`StatsError::NoRoundHolder`] when no
/// birthday participant holds the requested turn number.
pub fn per_round_stats(
    pool: &Pool,
    participants: &[Participant],
    ledger: &PaymentLedger,
    round: u32,
) -> Result<RoundStats, StatsError> {
    if round < 1 || round > pool.total_rounds() {
        return Err(StatsError::RoundOutOfRange {
            round,
            total_rounds: pool.total_rounds(),
        });
    }

    if pool.frequency().is_birthday() {
        birthday_round_stats(pool, participants, ledger, round)
    } else {
        Ok(fixed_round_stats(pool, participants, ledger, round))
    }
}

fn fixed_round_stats(
    pool: &Pool,
    participants: &[Participant],
    ledger: &PaymentLedger,
    round: u32,
) -> RoundStats {
    let mut paid_count = 0u32;
    let mut pending_count = 0u32;
    let mut collected = 0i64;

    for participant in participants {
        let record = ledger.record_or_default(participant.id(), round);
        if record.is_exempt() {
            continue;
        }
        if record.is_paid() {
            paid_count += 1;
            collected += record.amount();
        } else {
            pending_count += 1;
        }
    }

    let expected = pool.contribution_amount() * (paid_count + pending_count) as i64;
    RoundStats {
        round_number: round,
        paid_count,
        pending_count,
        amount_collected: collected,
        amount_expected: expected,
        percent: percent(collected, expected),
    }
}

fn birthday_round_stats(
    pool: &Pool,
    participants: &[Participant],
    ledger: &PaymentLedger,
    round: u32,
) -> Result<RoundStats, StatsError> {
    let holder = participants
        .iter()
        .find(|p| p.turn_number() == round)
        .ok_or(StatsError::NoRoundHolder { round })?;
    let holder_key = birthday_key(holder);

    // Every participant sharing the holder's (month, day) is a concurrent
    // beneficiary; their rounds share one calendar date.
    let beneficiary_rounds: Vec<u32> = participants
        .iter()
        .filter(|p| birthday_key(p) == holder_key)
        .map(|p| p.turn_number())
        .collect();

    let contributors_per_round = participants.len().saturating_sub(1) as i64;
    let expected =
        pool.contribution_amount() * contributors_per_round * beneficiary_rounds.len() as i64;

    let mut paid_count = 0u32;
    let mut collected = 0i64;
    for &benefit_round in &beneficiary_rounds {
        for participant in participants {
            // The round holder receives, never contributes
            if participant.turn_number() == benefit_round {
                continue;
            }
            let record = ledger.record_or_default(participant.id(), benefit_round);
            if record.is_exempt() {
                continue;
            }
            if record.is_paid() {
                paid_count += 1;
                collected += record.amount();
            }
        }
    }

    let total_contributors = contributors_per_round as u32 * beneficiary_rounds.len() as u32;
    Ok(RoundStats {
        round_number: round,
        paid_count,
        pending_count: total_contributors.saturating_sub(paid_count),
        amount_collected: collected,
        amount_expected: expected,
        percent: percent(collected, expected),
    })
}

/// Overall rotation progress: (current round − 1) / total rounds, in [0, 1]
pub fn overall_progress(pool: &Pool, participants: &[Participant], today: NaiveDate) -> f64 {
    let round = current_round(pool, participants, today);
    let progress = (round.saturating_sub(1)) as f64 / pool.total_rounds() as f64;
    progress.clamp(0.0, 1.0)
}

/// Full set of concurrently active birthday beneficiaries as of `today`
///
/// Participants sharing the minimum next birthday occurrence. Empty for
/// participant lists without birth dates.
pub fn concurrent_beneficiaries<'a>(
    participants: &'a [Participant],
    today: NaiveDate,
) -> Vec<&'a Participant> {
    let occurrences: Vec<(&Participant, NaiveDate)> = participants
        .iter()
        .filter_map(|p| {
            p.birth_date()
                .map(|birth| (p, next_birthday_occurrence(birth, today)))
        })
        .collect();

    let Some(min_date) = occurrences.iter().map(|(_, date)| *date).min() else {
        return Vec::new();
    };

    occurrences
        .into_iter()
        .filter(|(_, date)| *date == min_date)
        .map(|(p, _)| p)
        .collect()
}

/// One participant's standing against the rounds due so far
///
/// Fixed cadence: a round counts as due once `today` is past its due date.
/// Birthday: prior beneficiaries' birthdays plus the grace period, resolved
/// in `today`'s year, walked in turn order until the first not-yet-due round.
///
/// # Errors
/// [`StatsError::ParticipantNotFound`].
pub fn participant_standing(
    pool: &Pool,
    participants: &[Participant],
    ledger: &PaymentLedger,
    participant_id: &str,
    today: NaiveDate,
) -> Result<ParticipantStanding, StatsError> {
    if !participants.iter().any(|p| p.id() == participant_id) {
        return Err(StatsError::ParticipantNotFound {
            id: participant_id.to_string(),
        });
    }

    let expected = if pool.frequency().is_birthday() {
        birthday_rounds_due(participants, today)
    } else {
        fixed_rounds_due(pool, today)
    };

    let current = current_round(pool, participants, today);
    let made = ledger.paid_rounds(participant_id);
    let ahead = (current + 1..=pool.total_rounds())
        .filter(|&round| ledger.is_paid(participant_id, round))
        .count() as u32;

    let status = if made >= expected {
        Standing::UpToDate
    } else {
        Standing::Behind
    };

    Ok(ParticipantStanding {
        status,
        payments_expected: expected,
        payments_made: made,
        payments_ahead: ahead,
    })
}

fn fixed_rounds_due(pool: &Pool, today: NaiveDate) -> u32 {
    let windows = match pool_schedule(pool) {
        Ok(windows) => windows,
        Err(_) => return 0,
    };
    windows
        .iter()
        .take_while(|w| today > w.due_date)
        .count() as u32
}

fn birthday_rounds_due(participants: &[Participant], today: NaiveDate) -> u32 {
    let mut ordered: Vec<&Participant> = participants
        .iter()
        .filter(|p| p.birth_date().is_some())
        .collect();
    ordered.sort_by_key(|p| p.turn_number());

    let mut due = 0u32;
    for participant in ordered {
        let Some(birth) = participant.birth_date() else {
            continue;
        };
        let Some(occurrence) = crate::core::date::clamped_ymd(
            today.year(),
            birth.month(),
            birth.day(),
        ) else {
            continue;
        };
        let limit = due_date(occurrence).unwrap_or(occurrence);
        if today > limit {
            due += 1;
        } else {
            break;
        }
    }
    due
}

fn birthday_key(p: &Participant) -> Option<(u32, u32)> {
    p.birth_date().map(|b| (b.month(), b.day()))
}

fn percent(collected: i64, expected: i64) -> f64 {
    if expected > 0 {
        collected as f64 / expected as f64 * 100.0
    } else {
        0.0
    }
}
