//! Station-to-station adjacency built straight from the trip table.
//!
//! Answers nonstop-service questions and per-station schedule listings
//! without touching the time-expanded graph.

use crate::domain::{StationId, Trip};

/// Outbound and inbound trip lists per station.
///
/// Both views keep trip-table order. Lookups with an id outside `1..=N`
/// return an empty list rather than failing.
#[derive(Debug, Clone)]
pub struct DirectConnectionGraph {
    departures: Vec<Vec<Trip>>,
    arrivals: Vec<Vec<Trip>>,
}

impl DirectConnectionGraph {
    /// Build the adjacency for `station_count` stations.
    ///
    /// Trips naming a station outside `1..=station_count` are ignored; the
    /// trip table has already rejected them.
    pub fn new(trips: &[Trip], station_count: usize) -> Self {
        let mut departures = vec![Vec::new(); station_count];
        let mut arrivals = vec![Vec::new(); station_count];

        for trip in trips {
            let (Some(from), Some(to)) = (
                trip.origin().index_within(station_count),
                trip.destination().index_within(station_count),
            ) else {
                continue;
            };
            departures[from].push(*trip);
            arrivals[to].push(*trip);
        }

        Self {
            departures,
            arrivals,
        }
    }

    /// Number of stations covered.
    pub fn station_count(&self) -> usize {
        self.departures.len()
    }

    /// Trips leaving `station`, in trip-table order.
    pub fn trips_from(&self, station: StationId) -> &[Trip] {
        station
            .index()
            .and_then(|idx| self.departures.get(idx))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Trips arriving at `station`, in trip-table order.
    pub fn trips_into(&self, station: StationId) -> &[Trip] {
        station
            .index()
            .and_then(|idx| self.arrivals.get(idx))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether some single trip runs from `from` to `to`.
    pub fn has_direct_connection(&self, from: StationId, to: StationId) -> bool {
        self.trips_from(from)
            .iter()
            .any(|trip| trip.destination() == to)
    }
}
