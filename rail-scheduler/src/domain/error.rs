//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from file/IO errors raised while loading a schedule.

use super::{ClockTime, StationId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Arrival precedes departure; overnight running is not modeled
    #[error("trip arrives at {arrival} before it departs at {departure}")]
    OvernightTrip {
        departure: ClockTime,
        arrival: ClockTime,
    },

    /// Trip starts and ends at the same station
    #[error("trip starts and ends at station {0}")]
    SameStation(StationId),

    /// Station id outside the loaded schedule
    #[error("station {id} is not in the schedule (expected 1-{count})")]
    UnknownStation { id: StationId, count: usize },
}
