//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Station, StationId, Trip};
use crate::network::Route;
use crate::timetable::{StationSchedule, Timetable};

use super::dto::station_name;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the station list and query forms.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<StationView>,
}

/// Schedule for one station or for all of them.
#[derive(Template)]
#[template(path = "schedule.html")]
pub struct ScheduleTemplate {
    pub title: String,
    pub schedules: Vec<StationScheduleView>,
}

/// A best route.
#[derive(Template)]
#[template(path = "route.html")]
pub struct RouteTemplate {
    pub from: StationView,
    pub to: StationView,
    pub route: RouteView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Station view model for templates.
#[derive(Debug, Clone)]
pub struct StationView {
    pub id: u32,
    pub name: String,
}

impl StationView {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.get(),
            name: station.display_name(),
        }
    }

    pub fn lookup(timetable: &Timetable, id: StationId) -> Self {
        Self {
            id: id.get(),
            name: station_name(timetable, id),
        }
    }
}

/// One line of a station's departures or arrivals.
#[derive(Debug, Clone)]
pub struct TripView {
    /// The station at the other end of the trip
    pub other_station: String,
    pub departure: String,
    pub arrival: String,
    pub ride_mins: u32,
}

/// Departures and arrivals for a station.
#[derive(Debug, Clone)]
pub struct StationScheduleView {
    pub station: StationView,
    pub departures: Vec<TripView>,
    pub arrivals: Vec<TripView>,
}

impl StationScheduleView {
    pub fn from_schedule(timetable: &Timetable, schedule: &StationSchedule<'_>) -> Self {
        let view = |trip: &Trip, other: StationId| TripView {
            other_station: station_name(timetable, other),
            departure: trip.departure().to_string(),
            arrival: trip.arrival().to_string(),
            ride_mins: trip.ride_mins(),
        };

        Self {
            station: StationView::from_station(schedule.station),
            departures: schedule
                .departures
                .iter()
                .map(|t| view(t, t.destination()))
                .collect(),
            arrivals: schedule
                .arrivals
                .iter()
                .map(|t| view(t, t.origin()))
                .collect(),
        }
    }
}

/// Leg view model for templates.
#[derive(Debug, Clone)]
pub struct LegView {
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub arrival: String,
    pub ride_mins: u32,
    pub layover_after_mins: u32,
}

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub cost_label: &'static str,
    pub cost_mins: u32,
    pub ride_mins: u32,
    pub total_mins: u32,
    pub changes: usize,
    pub legs: Vec<LegView>,
}

impl RouteView {
    pub fn from_route(timetable: &Timetable, route: &Route) -> Self {
        let legs = route
            .legs()
            .iter()
            .map(|leg| LegView {
                origin: station_name(timetable, leg.origin()),
                destination: station_name(timetable, leg.destination()),
                departure: leg.departure().to_string(),
                arrival: leg.arrival().to_string(),
                ride_mins: leg.ride_mins(),
                layover_after_mins: leg.layover_after_mins,
            })
            .collect();

        Self {
            cost_label: route.cost_model().label(),
            cost_mins: route.cost_mins(),
            ride_mins: route.ride_mins(),
            total_mins: route.total_mins(),
            changes: route.change_count(),
            legs,
        }
    }

    /// Format minutes as "Xh Ym" or "Ym".
    pub fn format_duration(&self, mins: &u32) -> String {
        format_minutes(*mins)
    }
}

fn format_minutes(mins: u32) -> String {
    if mins >= 60 {
        format!("{}h {}m", mins / 60, mins % 60)
    } else {
        format!("{mins}m")
    }
}
