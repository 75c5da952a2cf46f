//! Participant model
//!
//! A participant holds one turn number inside a pool. In fixed-cadence pools
//! one natural person may be represented by several participant records
//! sharing identity fields, one record per held number. In birthday pools a
//! participant carries a birth date and its turn number is a derived ranking,
//! renumbered whenever participants are added or removed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A pool participant holding one turn number
///
/// # Example
/// ```
/// use tanda_core_rs::Participant;
///
/// let p = Participant::new(
///     "pool_1".to_string(),
///     "Maria".to_string(),
///     "+52 555 000 0001".to_string(),
///     3,
/// );
/// assert_eq!(p.turn_number(), 3);
/// assert!(p.birth_date().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Unique participant identifier (UUID)
    id: String,

    /// Pool this participant belongs to
    pool_id: String,

    /// Display name
    name: String,

    /// Contact phone (free text)
    phone: String,

    /// Turn number in [1, total_rounds]; derived ranking in birthday pools
    turn_number: u32,

    /// Birth date (birthday pools only)
    birth_date: Option<NaiveDate>,

    /// Registration timestamp, used as the ranking tie-break
    registered_at: DateTime<Utc>,

    /// Free-text comments, orthogonal to scheduling
    comments: String,
}

impl Participant {
    /// Create a fixed-cadence participant holding one turn number
    ///
    /// # Panics
    /// Panics if `turn_number` is zero: turn numbers are 1-based and a zero
    /// value can only come from corrupted persisted data.
    pub fn new(pool_id: String, name: String, phone: String, turn_number: u32) -> Self {
        assert!(turn_number >= 1, "turn numbers are 1-based");
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pool_id,
            name,
            phone,
            turn_number,
            birth_date: None,
            registered_at: Utc::now(),
            comments: String::new(),
        }
    }

    /// Create a birthday-pool participant
    ///
    /// The turn number starts at 1 and is replaced by the allocator's ranking
    /// pass; callers never pick it.
    pub fn new_birthday(
        pool_id: String,
        name: String,
        phone: String,
        birth_date: NaiveDate,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pool_id,
            name,
            phone,
            turn_number: 1,
            birth_date: Some(birth_date),
            registered_at,
            comments: String::new(),
        }
    }

    /// Set the registration timestamp (builder pattern)
    pub fn with_registered_at(mut self, registered_at: DateTime<Utc>) -> Self {
        self.registered_at = registered_at;
        self
    }

    /// Set free-text comments (builder pattern)
    pub fn with_comments(mut self, comments: String) -> Self {
        self.comments = comments;
        self
    }

    /// Get participant ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get owning pool ID
    pub fn pool_id(&self) -> &str {
        &self.pool_id
    }

    /// Get display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get contact phone
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Get turn number
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Get birth date (birthday pools only)
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// Get registration timestamp
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Get free-text comments
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Replace the turn number during a ranking pass
    pub(crate) fn set_turn_number(&mut self, turn_number: u32) {
        self.turn_number = turn_number;
    }
}
