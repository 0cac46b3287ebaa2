//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{StationId, Trip};
use crate::network::{CostModel, Route, RouteLeg};
use crate::timetable::{StationSchedule, Timetable};

/// Request naming a pair of stations.
///
/// Ids stay as raw strings so that bad input is reported by the handler.
#[derive(Debug, Deserialize)]
pub struct StationPairRequest {
    /// Departure station id
    pub from: String,

    /// Destination station id
    pub to: String,
}

/// Request to look up a station by name.
#[derive(Debug, Deserialize)]
pub struct StationLookupRequest {
    /// Station name; case-insensitive, `_` and space are interchangeable
    pub name: String,
}

/// Request to find a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequestParams {
    /// Departure station id
    pub from: String,

    /// Destination station id
    pub to: String,

    /// Cost model, `ride` or `total` (defaults to total)
    pub cost: Option<String>,

    /// Earliest departure, `HH:MM` or HHMM (optional)
    pub after: Option<String>,
}

/// A station.
#[derive(Debug, Clone, Serialize)]
pub struct StationResult {
    /// Station id
    pub id: u32,

    /// Name for display
    pub name: String,
}

impl StationResult {
    /// Resolve a station id against the timetable.
    pub fn lookup(timetable: &Timetable, id: StationId) -> Self {
        Self {
            id: id.get(),
            name: station_name(timetable, id),
        }
    }
}

/// Response listing stations.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResult>,
}

impl StationListResponse {
    pub fn from_timetable(timetable: &Timetable) -> Self {
        Self {
            stations: timetable
                .stations()
                .map(|s| StationResult::lookup(timetable, s.id))
                .collect(),
        }
    }
}

/// A scheduled trip.
#[derive(Debug, Serialize)]
pub struct TripResult {
    /// Departure station
    pub origin: StationResult,

    /// Arrival station
    pub destination: StationResult,

    /// Departure time (HH:MM)
    pub departure: String,

    /// Arrival time (HH:MM)
    pub arrival: String,

    /// Minutes aboard
    pub ride_mins: u32,
}

impl TripResult {
    pub fn from_trip(timetable: &Timetable, trip: &Trip) -> Self {
        Self {
            origin: StationResult::lookup(timetable, trip.origin()),
            destination: StationResult::lookup(timetable, trip.destination()),
            departure: trip.departure().to_string(),
            arrival: trip.arrival().to_string(),
            ride_mins: trip.ride_mins(),
        }
    }
}

/// Departures and arrivals for a station.
#[derive(Debug, Serialize)]
pub struct StationScheduleResponse {
    pub station: StationResult,
    pub departures: Vec<TripResult>,
    pub arrivals: Vec<TripResult>,
}

impl StationScheduleResponse {
    pub fn from_schedule(timetable: &Timetable, schedule: &StationSchedule<'_>) -> Self {
        Self {
            station: StationResult::lookup(timetable, schedule.station.id),
            departures: schedule
                .departures
                .iter()
                .map(|t| TripResult::from_trip(timetable, t))
                .collect(),
            arrivals: schedule
                .arrivals
                .iter()
                .map(|t| TripResult::from_trip(timetable, t))
                .collect(),
        }
    }
}

/// The whole schedule, station by station.
#[derive(Debug, Serialize)]
pub struct FullScheduleResponse {
    pub stations: Vec<StationScheduleResponse>,
}

/// Whether service is available between two stations.
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub from: StationResult,
    pub to: StationResult,

    /// Whether only single-trip (nonstop) service was considered
    pub nonstop: bool,

    pub available: bool,
}

/// A leg of a route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub origin: StationResult,
    pub destination: StationResult,

    /// Departure time (HH:MM)
    pub departure: String,

    /// Arrival time (HH:MM)
    pub arrival: String,

    pub ride_mins: u32,

    /// Wait before the next leg
    pub layover_after_mins: u32,
}

impl LegResult {
    pub fn from_leg(timetable: &Timetable, leg: &RouteLeg) -> Self {
        Self {
            origin: StationResult::lookup(timetable, leg.origin()),
            destination: StationResult::lookup(timetable, leg.destination()),
            departure: leg.departure().to_string(),
            arrival: leg.arrival().to_string(),
            ride_mins: leg.ride_mins(),
            layover_after_mins: leg.layover_after_mins,
        }
    }
}

/// A best route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: StationResult,
    pub to: StationResult,
    pub cost_model: CostModel,

    /// Cost under `cost_model`, in minutes
    pub cost_mins: u32,

    /// Departure time of the first leg
    pub departure_time: Option<String>,

    /// Arrival time of the last leg
    pub arrival_time: Option<String>,

    pub ride_mins: u32,
    pub total_mins: u32,
    pub changes: usize,
    pub legs: Vec<LegResult>,
}

impl RouteResponse {
    pub fn from_route(timetable: &Timetable, from: StationId, to: StationId, route: &Route) -> Self {
        Self {
            from: StationResult::lookup(timetable, from),
            to: StationResult::lookup(timetable, to),
            cost_model: route.cost_model(),
            cost_mins: route.cost_mins(),
            departure_time: route.departure_time().map(|t| t.to_string()),
            arrival_time: route.arrival_time().map(|t| t.to_string()),
            ride_mins: route.ride_mins(),
            total_mins: route.total_mins(),
            changes: route.change_count(),
            legs: route
                .legs()
                .iter()
                .map(|leg| LegResult::from_leg(timetable, leg))
                .collect(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Display name for a station id, or a placeholder for unknown ids.
pub(crate) fn station_name(timetable: &Timetable, id: StationId) -> String {
    timetable
        .station(id)
        .map(|s| s.display_name())
        .unwrap_or_else(|| "INVALID".to_string())
}
