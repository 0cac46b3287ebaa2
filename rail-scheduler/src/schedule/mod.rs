//! Schedule data loading.
//!
//! Reads the station and trip data files, and validates the records into
//! tables the routing engine can trust.

mod error;
mod parse;
mod table;

pub use error::{RecordError, RecordKind, ScheduleError};
pub use parse::{
    StationRecord, TripRecord, parse_stations, parse_trips, read_stations, read_trips,
};
pub use table::{StationTable, TripTable};
