//! Pool model
//!
//! A pool ("tanda") is a fixed group of participants rotating a pooled
//! contribution. Each pool has:
//! - A contribution amount (i64 cents) every participant pays per round
//! - A total number of rounds
//! - A frequency: weekly, biweekly, monthly, or birthday-triggered
//! - A start date (fixed-cadence pools only)
//!
//! CRITICAL: All money values are i64 (cents)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Payment method assumed when neither the pool nor a record names one.
pub const DEFAULT_PAYMENT_METHOD: &str = "transfer";

/// Round cadence of a pool
///
/// Fixed cadences advance on the calendar; `Birthday` pools advance when a
/// participant's birthday arrives, and carry no start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// One round every 7 calendar days
    Weekly,
    /// One round every 14 calendar days
    Biweekly,
    /// One round every calendar month, day-of-month preserved and clamped
    Monthly,
    /// Rounds triggered by participants' birthdays
    Birthday,
}

impl Frequency {
    /// Check whether this is the birthday cadence
    pub fn is_birthday(&self) -> bool {
        matches!(self, Frequency::Birthday)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Birthday => "birthday",
        };
        write!(f, "{}", name)
    }
}

/// Errors for malformed pool data and schedule inputs
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Contribution amount must be positive, got {amount}")]
    NonPositiveContribution { amount: i64 },

    #[error("Pool must have at least one round")]
    ZeroTotalRounds,

    #[error("Frequency {frequency} requires a start date")]
    MissingStartDate { frequency: Frequency },

    #[error("Birthday pools do not take a start date")]
    UnexpectedStartDate,

    #[error("Operation does not support the {frequency} frequency")]
    UnsupportedFrequency { frequency: Frequency },

    #[error("Computed date is outside the representable calendar range")]
    DateOutOfRange,
}

/// A rotating-savings pool
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tanda_core_rs::{Frequency, Pool};
///
/// let pool = Pool::new(
///     "Office tanda".to_string(),
///     50_000, // $500.00 in cents
///     10,
///     Frequency::Weekly,
///     NaiveDate::from_ymd_opt(2024, 1, 15),
/// ).unwrap();
///
/// assert_eq!(pool.total_rounds(), 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    /// Unique pool identifier (UUID)
    id: String,

    /// Display name
    name: String,

    /// Contribution per participant per round (i64 cents)
    contribution_amount: i64,

    /// Total number of rounds in one full rotation
    total_rounds: u32,

    /// Round cadence
    frequency: Frequency,

    /// First round's start date (fixed-cadence pools only)
    start_date: Option<NaiveDate>,

    /// Default payment method for ledger records
    payment_method: Option<String>,

    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Pool {
    /// Create a new pool
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `contribution_amount` - Per-round contribution in cents (must be positive)
    /// * `total_rounds` - Number of rounds (must be >= 1)
    /// * `frequency` - Round cadence
    /// * `start_date` - Required for fixed cadences, rejected for birthday pools
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when the contribution is not positive,
    /// `total_rounds` is zero, or the start date does not match the frequency.
    ///
    /// # Example
    /// ```
    /// use tanda_core_rs::{Frequency, Pool};
    ///
    /// let pool = Pool::new(
    ///     "Birthday club".to_string(),
    ///     20_000,
    ///     8,
    ///     Frequency::Birthday,
    ///     None,
    /// ).unwrap();
    ///
    /// assert!(pool.frequency().is_birthday());
    /// ```
    pub fn new(
        name: String,
        contribution_amount: i64,
        total_rounds: u32,
        frequency: Frequency,
        start_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        if contribution_amount <= 0 {
            return Err(ValidationError::NonPositiveContribution {
                amount: contribution_amount,
            });
        }
        if total_rounds == 0 {
            return Err(ValidationError::ZeroTotalRounds);
        }
        match (frequency, start_date) {
            (Frequency::Birthday, Some(_)) => return Err(ValidationError::UnexpectedStartDate),
            (Frequency::Birthday, None) => {}
            (_, None) => return Err(ValidationError::MissingStartDate { frequency }),
            (_, Some(_)) => {}
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            contribution_amount,
            total_rounds,
            frequency,
            start_date,
            payment_method: None,
            created_at: Utc::now(),
        })
    }

    /// Set the pool's default payment method (builder pattern)
    pub fn with_payment_method(mut self, method: String) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Get pool ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get per-round contribution (i64 cents)
    pub fn contribution_amount(&self) -> i64 {
        self.contribution_amount
    }

    /// Get total number of rounds
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Get round cadence
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Get the first round's start date (fixed cadences only)
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Default payment method for this pool's ledger records
    pub fn default_payment_method(&self) -> &str {
        self.payment_method
            .as_deref()
            .unwrap_or(DEFAULT_PAYMENT_METHOD)
    }

    /// Get creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
