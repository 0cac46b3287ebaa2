//! Scheduled trip type.
//!
//! A `Trip` is one scheduled single-leg run between two stations. Times are
//! validated at construction so that `ride_mins()` is never negative.

use super::{ClockTime, DomainError, StationId};

/// One scheduled single-leg run.
///
/// # Invariants
///
/// - `origin != destination`
/// - `departure <= arrival` (no overnight running)
///
/// # Examples
///
/// ```
/// use rail_scheduler::domain::{ClockTime, StationId, Trip};
///
/// let trip = Trip::new(
///     StationId::new(1),
///     StationId::new(2),
///     ClockTime::from_hhmm(800).unwrap(),
///     ClockTime::from_hhmm(915).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(trip.ride_mins(), 75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trip {
    origin: StationId,
    destination: StationId,
    departure: ClockTime,
    arrival: ClockTime,
}

impl Trip {
    /// Construct a trip, rejecting overnight and same-station runs.
    pub fn new(
        origin: StationId,
        destination: StationId,
        departure: ClockTime,
        arrival: ClockTime,
    ) -> Result<Self, DomainError> {
        if origin == destination {
            return Err(DomainError::SameStation(origin));
        }
        if arrival < departure {
            return Err(DomainError::OvernightTrip { departure, arrival });
        }

        Ok(Self {
            origin,
            destination,
            departure,
            arrival,
        })
    }

    /// Returns the departure station.
    pub fn origin(&self) -> StationId {
        self.origin
    }

    /// Returns the arrival station.
    pub fn destination(&self) -> StationId {
        self.destination
    }

    /// Returns the departure time.
    pub fn departure(&self) -> ClockTime {
        self.departure
    }

    /// Returns the arrival time.
    pub fn arrival(&self) -> ClockTime {
        self.arrival
    }

    /// Minutes spent aboard.
    pub fn ride_mins(&self) -> u32 {
        // Non-negative: arrival >= departure is checked in `new`
        self.departure.minutes_until(self.arrival) as u32
    }

    /// Whether `next` can be boarded after alighting from this trip.
    ///
    /// `next` must leave from this trip's destination no earlier than this
    /// trip arrives. Equal times are a valid (zero-minute) connection.
    pub fn connects_to(&self, next: &Trip) -> bool {
        self.destination == next.origin && self.arrival <= next.departure
    }

    /// Minutes waited between this trip's arrival and `next`'s departure.
    ///
    /// Only meaningful when `connects_to(next)` holds.
    pub fn layover_before(&self, next: &Trip) -> u32 {
        self.arrival.minutes_until(next.departure).max(0) as u32
    }
}
