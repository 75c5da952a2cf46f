//! Payment ledger
//!
//! Keyed store of payment records: (participant_id, round_number) → record.
//! Records are created lazily on first mutation; an absent record is
//! implicitly unpaid with the pool defaults.
//!
//! # Critical Invariants
//!
//! 1. **Sequential payment (quick-toggle only)**: marking round R paid
//!    requires rounds 1..R-1 already paid for that participant. The
//!    detailed-edit path deliberately bypasses this: it is the admin
//!    override, and the asymmetry is preserved from the original design.
//! 2. **Protected customization**: un-marking a record that carries notes, an
//!    exemption, a non-default amount, or a non-default method keeps the
//!    record with `paid = false`; an uncustomized record is reset to defaults.
//! 3. **No partial mutation**: a failed operation leaves the ledger unchanged.
//! 4. Records are never deleted by the engine; cascading deletion is the
//!    caller's concern.

use crate::models::payment::{PaymentRecord, PaymentUpdate};
use crate::models::pool::Pool;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors for ledger mutations
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Cannot mark round {round} paid: round {first_unpaid} is still unpaid")]
    SequentialPaymentViolation { round: u32, first_unpaid: u32 },

    #[error("Round {round} is outside 1..={total_rounds}")]
    RoundOutOfRange { round: u32, total_rounds: u32 },
}

/// Payment ledger for one pool
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tanda_core_rs::{Frequency, PaymentLedger, Pool};
///
/// let pool = Pool::new(
///     "T".to_string(),
///     50_000,
///     10,
///     Frequency::Weekly,
///     NaiveDate::from_ymd_opt(2024, 1, 1),
/// ).unwrap();
///
/// let mut ledger = PaymentLedger::new(&pool);
/// let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
///
/// let record = ledger.toggle("p1", 1, today).unwrap();
/// assert!(record.is_paid());
/// assert_eq!(record.amount(), 50_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLedger {
    /// Pool contribution per round (i64 cents), the default record amount
    contribution_amount: i64,

    /// Number of rounds; mutations outside 1..=total_rounds are rejected
    total_rounds: u32,

    /// Pool default payment method
    default_method: String,

    /// Sparse record store; serialized as a sorted record list so snapshots
    /// survive JSON (tuple map keys do not)
    #[serde(with = "record_list")]
    records: HashMap<(String, u32), PaymentRecord>,
}

mod record_list {
    use super::PaymentRecord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S: Serializer>(
        records: &HashMap<(String, u32), PaymentRecord>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut list: Vec<&PaymentRecord> = records.values().collect();
        list.sort_by_key(|r| (r.participant_id().to_string(), r.round_number()));
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<(String, u32), PaymentRecord>, D::Error> {
        let list = Vec::<PaymentRecord>::deserialize(deserializer)?;
        Ok(list
            .into_iter()
            .map(|r| ((r.participant_id().to_string(), r.round_number()), r))
            .collect())
    }
}

impl PaymentLedger {
    /// Create an empty ledger carrying the pool's defaults
    pub fn new(pool: &Pool) -> Self {
        Self {
            contribution_amount: pool.contribution_amount(),
            total_rounds: pool.total_rounds(),
            default_method: pool.default_payment_method().to_string(),
            records: HashMap::new(),
        }
    }

    /// Rebuild a ledger from persisted records
    ///
    /// Records referencing rounds outside the pool's range are dropped rather
    /// than trusted; they can only come from inconsistent persisted data.
    pub fn from_records(pool: &Pool, records: Vec<PaymentRecord>) -> Self {
        let mut ledger = Self::new(pool);
        for record in records {
            if record.round_number() >= 1 && record.round_number() <= ledger.total_rounds {
                ledger.records.insert(
                    (record.participant_id().to_string(), record.round_number()),
                    record,
                );
            }
        }
        ledger
    }

    /// Get a record, if one was ever materialized
    pub fn get(&self, participant_id: &str, round: u32) -> Option<&PaymentRecord> {
        self.records.get(&(participant_id.to_string(), round))
    }

    /// Record for a cell, falling back to the implicit unpaid default
    pub fn record_or_default(&self, participant_id: &str, round: u32) -> PaymentRecord {
        self.get(participant_id, round).cloned().unwrap_or_else(|| {
            PaymentRecord::unpaid_default(
                participant_id.to_string(),
                round,
                self.contribution_amount,
                &self.default_method,
            )
        })
    }

    /// Whether a cell is marked paid (absent cells are unpaid)
    pub fn is_paid(&self, participant_id: &str, round: u32) -> bool {
        self.get(participant_id, round)
            .map(|r| r.is_paid())
            .unwrap_or(false)
    }

    /// Whether the quick-toggle path may mark this round paid
    ///
    /// Round 1 is always payable; later rounds require all prior rounds paid.
    pub fn can_pay(&self, participant_id: &str, round: u32) -> bool {
        self.first_unpaid_before(participant_id, round).is_none()
    }

    /// Number of rounds this participant has paid
    pub fn paid_rounds(&self, participant_id: &str) -> u32 {
        (1..=self.total_rounds)
            .filter(|&round| self.is_paid(participant_id, round))
            .count() as u32
    }

    /// Quick-toggle a cell between paid and unpaid
    ///
    /// Marking paid enforces the sequential-payment invariant and stamps
    /// `today` as the payment date, keeping any existing amount and method.
    /// Marking unpaid applies the protected-customization rule.
    ///
    /// # Errors
    /// [`LedgerError::RoundOutOfRange`] or
    /// [`LedgerError::SequentialPaymentViolation`]; either way the ledger is
    /// left unchanged.
    pub fn toggle(
        &mut self,
        participant_id: &str,
        round: u32,
        today: NaiveDate,
    ) -> Result<&PaymentRecord, LedgerError> {
        self.check_round(round)?;

        if self.is_paid(participant_id, round) {
            return Ok(self.unmark(participant_id, round));
        }

        if let Some(first_unpaid) = self.first_unpaid_before(participant_id, round) {
            return Err(LedgerError::SequentialPaymentViolation {
                round,
                first_unpaid,
            });
        }

        let key = (participant_id.to_string(), round);
        let contribution = self.contribution_amount;
        let method = self.default_method.clone();
        let record = self.records.entry(key).or_insert_with(|| {
            PaymentRecord::unpaid_default(participant_id.to_string(), round, contribution, &method)
        });
        record.set_paid(true);
        record.set_paid_at(Some(today));
        Ok(record)
    }

    /// Detailed-edit upsert: set arbitrary values on a cell
    ///
    /// This path performs NO sequential check — it is the administrative
    /// override for correcting history, and must stay unguarded.
    ///
    /// # Errors
    /// [`LedgerError::RoundOutOfRange`].
    pub fn record_payment(
        &mut self,
        participant_id: &str,
        round: u32,
        update: &PaymentUpdate,
    ) -> Result<&PaymentRecord, LedgerError> {
        self.check_round(round)?;

        let key = (participant_id.to_string(), round);
        let contribution = self.contribution_amount;
        let method = self.default_method.clone();
        let record = self.records.entry(key).or_insert_with(|| {
            PaymentRecord::unpaid_default(participant_id.to_string(), round, contribution, &method)
        });
        record.apply(update);
        Ok(record)
    }

    /// Iterate all materialized records
    pub fn records(&self) -> impl Iterator<Item = &PaymentRecord> {
        self.records.values()
    }

    /// Number of materialized records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record was ever materialized
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pool contribution this ledger was built with (i64 cents)
    pub fn contribution_amount(&self) -> i64 {
        self.contribution_amount
    }

    /// Default payment method this ledger was built with
    pub fn default_method(&self) -> &str {
        &self.default_method
    }

    fn check_round(&self, round: u32) -> Result<(), LedgerError> {
        if round < 1 || round > self.total_rounds {
            return Err(LedgerError::RoundOutOfRange {
                round,
                total_rounds: self.total_rounds,
            });
        }
        Ok(())
    }

    fn first_unpaid_before(&self, participant_id: &str, round: u32) -> Option<u32> {
        (1..round).find(|&r| !self.is_paid(participant_id, r))
    }

    fn unmark(&mut self, participant_id: &str, round: u32) -> &PaymentRecord {
        let contribution = self.contribution_amount;
        let method = self.default_method.clone();
        let key = (participant_id.to_string(), round);
        let record = self.records.entry(key).or_insert_with(|| {
            PaymentRecord::unpaid_default(participant_id.to_string(), round, contribution, &method)
        });

        if record.is_customized(contribution, &method) {
            record.set_paid(false);
        } else {
            record.reset_to_defaults(contribution, &method);
        }
        record
    }
}
