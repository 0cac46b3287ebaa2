//! Validated station and trip tables.
//!
//! Tables are built from parsed records and are all-or-nothing: a single bad
//! record rejects the whole table, so no partially valid schedule is ever
//! handed to the routing engine.

use crate::domain::{ClockTime, DomainError, Station, StationId, Trip};

use super::error::{RecordError, RecordKind, ScheduleError};
use super::parse::{StationRecord, TripRecord};

/// The stations of a schedule, indexed by id.
///
/// # Invariants
///
/// - Station ids run contiguously from 1 to `len()`
/// - `stations[i].id == i + 1`
#[derive(Debug, Clone)]
pub struct StationTable {
    stations: Vec<Station>,
}

impl StationTable {
    /// Build the table from records in any order.
    ///
    /// Records are stable-sorted by id, which must then run `1..=N` without
    /// gaps or duplicates.
    pub fn new(mut records: Vec<StationRecord>) -> Result<Self, ScheduleError> {
        records.sort_by_key(|r| r.id);

        let mut stations = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let expected = StationId::from_index(idx);
            if record.id != expected.get() {
                let reason = if record.id == 0 {
                    RecordError::ZeroStationId
                } else if record.id < expected.get() {
                    RecordError::DuplicateStationId(record.id)
                } else {
                    RecordError::StationIdGap {
                        expected,
                        found: record.id,
                    }
                };
                return Err(ScheduleError::malformed(RecordKind::Station, record.line, reason));
            }
            stations.push(Station::new(expected, record.name));
        }

        Ok(Self { stations })
    }

    /// Number of stations (`N`).
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the table has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Whether `id` lies in `1..=N`.
    pub fn contains(&self, id: StationId) -> bool {
        id.index_within(self.len()).is_some()
    }

    /// Look up a station by id.
    pub fn get(&self, id: StationId) -> Option<&Station> {
        id.index().and_then(|idx| self.stations.get(idx))
    }

    /// All stations in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Find a station by name, ignoring case and treating `_` as a space.
    pub fn find_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.matches_name(name))
    }
}

/// The validated trips of a schedule, in file order.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    trips: Vec<Trip>,
}

impl TripTable {
    /// Validate trip records against the station table.
    pub fn new(records: &[TripRecord], stations: &StationTable) -> Result<Self, ScheduleError> {
        let trips = records
            .iter()
            .map(|record| {
                validate_trip(record, stations)
                    .map_err(|reason| ScheduleError::malformed(RecordKind::Trip, record.line, reason))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { trips })
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the table has no trips.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Look up a trip by its position in the table.
    pub fn get(&self, index: usize) -> Option<&Trip> {
        self.trips.get(index)
    }

    /// All trips in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }

    /// All trips as a slice.
    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }
}

fn validate_trip(record: &TripRecord, stations: &StationTable) -> Result<Trip, RecordError> {
    let origin = known_station(record.origin, stations)?;
    let destination = known_station(record.destination, stations)?;
    let departure = record_time("departure", record.departure)?;
    let arrival = record_time("arrival", record.arrival)?;

    Ok(Trip::new(origin, destination, departure, arrival)?)
}

fn record_time(field: &'static str, raw: u32) -> Result<ClockTime, RecordError> {
    ClockTime::from_hhmm(raw).map_err(|source| RecordError::InvalidTime { field, raw, source })
}

fn known_station(raw: u32, stations: &StationTable) -> Result<StationId, DomainError> {
    let id = StationId::new(raw);
    if stations.contains(id) {
        Ok(id)
    } else {
        Err(DomainError::UnknownStation {
            id,
            count: stations.len(),
        })
    }
}
