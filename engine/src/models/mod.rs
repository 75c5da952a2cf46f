//! Domain models for the tanda engine

pub mod participant;
pub mod payment;
pub mod pool;

// Re-exports
pub use participant::Participant;
pub use payment::{PaymentRecord, PaymentUpdate};
pub use pool::{Frequency, Pool, ValidationError};
