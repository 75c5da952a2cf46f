//! Tanda Core - Scheduling & Payment Ledger Engine
//!
//! Computation core for rotating-savings pools ("tandas"): fixed groups of
//! participants taking turns receiving a pooled contribution, on a fixed
//! calendar cadence or triggered by participants' birthdays.
//!
//! # Architecture
//!
//! - **core**: Calendar-date arithmetic
//! - **models**: Domain types (Pool, Participant, PaymentRecord)
//! - **schedule**: Round date-window calculator (fixed cadences)
//! - **rounds**: Active-round resolution
//! - **allocation**: Turn number assignment and birthday ranking
//! - **ledger**: Payment records with the sequential-payment invariant
//! - **stats**: Per-round and overall aggregate statistics
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All dates are timezone-less calendar dates
//! 3. Every operation is a pure computation (or a single-writer mutation of
//!    the ledger) over a caller-supplied snapshot; persistence, transport
//!    and presentation live outside this crate

// Module declarations
pub mod allocation;
pub mod core;
pub mod ledger;
pub mod models;
pub mod rounds;
pub mod schedule;
pub mod stats;

// Re-exports for convenience
pub use allocation::{
    allocate_turns, max_selection, register_birthday_participant, remove_birthday_participant,
    rerank, AllocationError,
};
pub use crate::core::date::{next_birthday_occurrence, GRACE_PERIOD_DAYS};
pub use ledger::{LedgerError, PaymentLedger};
pub use models::{
    participant::Participant,
    payment::{PaymentRecord, PaymentUpdate},
    pool::{Frequency, Pool, ValidationError, DEFAULT_PAYMENT_METHOD},
};
pub use rounds::{current_round, is_upcoming};
pub use schedule::{compute_schedule, pool_schedule, RoundWindow};
pub use stats::{
    concurrent_beneficiaries, overall_progress, participant_standing, per_round_stats,
    ParticipantStanding, RoundStats, Standing, StatsError,
};
