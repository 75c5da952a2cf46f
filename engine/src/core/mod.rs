//! Calendar-date arithmetic for the engine

pub mod date;
