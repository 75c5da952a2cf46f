//! Payment record model
//!
//! A payment record is keyed by (participant_id, round_number). Records are
//! created lazily on first mutation; an absent record means implicitly unpaid
//! with the pool's default amount and method. The ledger never deletes a
//! record, it resets uncustomized ones to defaults.
//!
//! CRITICAL: All money values are i64 (cents)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One participant's payment state for one round
///
/// `exempt` marks the participant as that round's beneficiary: exempt rounds
/// do not contribute and are excluded from expected/collected sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Participant this record belongs to
    participant_id: String,

    /// Round number in [1, total_rounds]
    round_number: u32,

    /// Whether the round has been paid
    paid: bool,

    /// Amount paid or expected (i64 cents, defaults to the contribution)
    amount: i64,

    /// Date the payment was made
    paid_at: Option<NaiveDate>,

    /// Payment method (free text)
    method: String,

    /// Free-text notes
    notes: String,

    /// Beneficiary flag: this participant receives the round and does not pay
    exempt: bool,
}

impl PaymentRecord {
    /// Create an unpaid record carrying the pool defaults
    pub fn unpaid_default(
        participant_id: String,
        round_number: u32,
        contribution_amount: i64,
        default_method: &str,
    ) -> Self {
        Self {
            participant_id,
            round_number,
            paid: false,
            amount: contribution_amount,
            paid_at: None,
            method: default_method.to_string(),
            notes: String::new(),
            exempt: false,
        }
    }

    /// Get owning participant ID
    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    /// Get round number
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Whether the round has been paid
    pub fn is_paid(&self) -> bool {
        self.paid
    }

    /// Get amount (i64 cents)
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Get payment date
    pub fn paid_at(&self) -> Option<NaiveDate> {
        self.paid_at
    }

    /// Get payment method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get notes
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Whether this participant is the round's beneficiary
    pub fn is_exempt(&self) -> bool {
        self.exempt
    }

    /// Partial payment: paid less than the contribution without being exempt
    ///
    /// Partial is derived, never stored.
    pub fn is_partial(&self, contribution_amount: i64) -> bool {
        !self.exempt && self.amount < contribution_amount
    }

    /// Whether the record carries data worth protecting on un-marking:
    /// notes, an exemption, a non-default amount, or a non-default method
    pub fn is_customized(&self, contribution_amount: i64, default_method: &str) -> bool {
        !self.notes.is_empty()
            || self.exempt
            || self.amount != contribution_amount
            || self.method != default_method
    }

    pub(crate) fn set_paid(&mut self, paid: bool) {
        self.paid = paid;
    }

    pub(crate) fn set_paid_at(&mut self, paid_at: Option<NaiveDate>) {
        self.paid_at = paid_at;
    }

    pub(crate) fn apply(&mut self, update: &PaymentUpdate) {
        self.paid = update.paid;
        self.amount = update.amount;
        self.paid_at = update.paid_at;
        self.method = update.method.clone();
        self.notes = update.notes.clone();
        self.exempt = update.exempt;
    }

    pub(crate) fn reset_to_defaults(&mut self, contribution_amount: i64, default_method: &str) {
        self.paid = false;
        self.amount = contribution_amount;
        self.paid_at = None;
        self.method = default_method.to_string();
        self.notes.clear();
        self.exempt = false;
    }
}

/// Full field set submitted by the detailed-edit path
///
/// The detailed edit sets arbitrary historical values directly and bypasses
/// the sequential-payment check; see the ledger module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    /// Whether the round is paid
    pub paid: bool,
    /// Amount in cents
    pub amount: i64,
    /// Date the payment was made
    pub paid_at: Option<NaiveDate>,
    /// Payment method (free text)
    pub method: String,
    /// Free-text notes
    pub notes: String,
    /// Beneficiary flag
    pub exempt: bool,
}
