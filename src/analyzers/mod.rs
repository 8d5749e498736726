//! Statistics over the joined appearance tables.
//!
//! Computes per-station counts, average recurrence of personalities, and the
//! normal-approximation parity test.

pub mod aggregate;
pub mod parity;
pub mod recurrence;
pub mod types;
pub mod utility;
