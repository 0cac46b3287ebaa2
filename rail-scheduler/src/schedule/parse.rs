//! Parsing of schedule data files.
//!
//! Both files hold one record per line with whitespace-separated tokens.
//! Blank lines are skipped.
//!
//! ```text
//! # stations.dat: <id> <name...>
//! 1 Alpha
//! 2 Union_Station
//!
//! # trains.dat: <origin> <destination> <departure HHMM> <arrival HHMM>
//! 1 2 800 900
//! ```
//!
//! Parsing is purely structural; range and time checks happen when the
//! records are turned into tables.

use std::fs;
use std::path::Path;

use super::error::{RecordError, RecordKind, ScheduleError};

/// A station line as read from a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub id: u32,
    pub name: String,
    /// Source line (1-based), 0 if not read from a file
    pub line: usize,
}

impl StationRecord {
    /// Create a record that did not come from a file.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            line: 0,
        }
    }
}

/// A trip line as read from a data file. Times are HHMM integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRecord {
    pub origin: u32,
    pub destination: u32,
    pub departure: u32,
    pub arrival: u32,
    /// Source line (1-based), 0 if not read from a file
    pub line: usize,
}

impl TripRecord {
    /// Create a record that did not come from a file.
    pub fn new(origin: u32, destination: u32, departure: u32, arrival: u32) -> Self {
        Self {
            origin,
            destination,
            departure,
            arrival,
            line: 0,
        }
    }
}

/// Parse the contents of a station data file.
pub fn parse_stations(text: &str) -> Result<Vec<StationRecord>, ScheduleError> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = line.split_whitespace();

        let Some(id_token) = tokens.next() else {
            continue;
        };
        let id = parse_field(id_token, RecordKind::Station, line_no, "station id")?;

        let name = tokens.collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return Err(ScheduleError::malformed(
                RecordKind::Station,
                line_no,
                RecordError::Syntax("missing station name".to_string()),
            ));
        }

        records.push(StationRecord {
            id,
            name,
            line: line_no,
        });
    }

    Ok(records)
}

/// Parse the contents of a trip data file.
pub fn parse_trips(text: &str) -> Result<Vec<TripRecord>, ScheduleError> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 4 {
            return Err(ScheduleError::malformed(
                RecordKind::Trip,
                line_no,
                RecordError::Syntax(format!("expected 4 fields, found {}", tokens.len())),
            ));
        }

        records.push(TripRecord {
            origin: parse_field(tokens[0], RecordKind::Trip, line_no, "origin station id")?,
            destination: parse_field(
                tokens[1],
                RecordKind::Trip,
                line_no,
                "destination station id",
            )?,
            departure: parse_field(tokens[2], RecordKind::Trip, line_no, "departure time")?,
            arrival: parse_field(tokens[3], RecordKind::Trip, line_no, "arrival time")?,
            line: line_no,
        });
    }

    Ok(records)
}

/// Read and parse a station data file.
pub fn read_stations(path: &Path) -> Result<Vec<StationRecord>, ScheduleError> {
    parse_stations(&read_file(path)?)
}

/// Read and parse a trip data file.
pub fn read_trips(path: &Path) -> Result<Vec<TripRecord>, ScheduleError> {
    parse_trips(&read_file(path)?)
}

fn read_file(path: &Path) -> Result<String, ScheduleError> {
    fs::read_to_string(path).map_err(|source| ScheduleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_field(
    token: &str,
    kind: RecordKind,
    line: usize,
    field: &str,
) -> Result<u32, ScheduleError> {
    token.parse().map_err(|_| {
        ScheduleError::malformed(
            kind,
            line,
            RecordError::Syntax(format!(
                "{field} must be a non-negative integer, found {token:?}"
            )),
        )
    })
}
