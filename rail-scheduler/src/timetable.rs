//! The loaded schedule and its query surface.
//!
//! A `Timetable` owns the validated station and trip tables together with
//! every structure derived from them. It is built once, before any query,
//! and is read-only afterwards, so it can be shared behind an `Arc`.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{ClockTime, Station, StationId, Trip};
use crate::network::{
    CostModel, DirectConnectionGraph, Route, RouteError, RoutePlanner, RouteRequest,
};
use crate::schedule::{
    ScheduleError, StationRecord, StationTable, TripRecord, TripTable, read_stations, read_trips,
};

/// Departures and arrivals for one station, in trip-table order.
#[derive(Debug, Clone, Copy)]
pub struct StationSchedule<'a> {
    pub station: &'a Station,
    pub departures: &'a [Trip],
    pub arrivals: &'a [Trip],
}

/// A fully built schedule ready for queries.
#[derive(Debug, Clone)]
pub struct Timetable {
    stations: StationTable,
    trips: TripTable,
    direct: DirectConnectionGraph,
    planner: RoutePlanner,
}

impl Timetable {
    /// Build every derived structure from validated tables.
    pub fn new(stations: StationTable, trips: TripTable) -> Self {
        let direct = DirectConnectionGraph::new(trips.as_slice(), stations.len());
        let planner = RoutePlanner::new(trips.as_slice(), stations.len());

        debug!(
            stations = stations.len(),
            trips = trips.len(),
            nodes = planner.graph().node_count(),
            edges = planner.graph().edge_count(),
            "Built routing tables"
        );

        Self {
            stations,
            trips,
            direct,
            planner,
        }
    }

    /// Validate parsed records and build the timetable.
    pub fn from_records(
        stations: Vec<StationRecord>,
        trips: &[TripRecord],
    ) -> Result<Self, ScheduleError> {
        let stations = StationTable::new(stations)?;
        let trips = TripTable::new(trips, &stations)?;
        Ok(Self::new(stations, trips))
    }

    /// Read both data files and build the timetable.
    pub fn load(stations_path: &Path, trips_path: &Path) -> Result<Self, ScheduleError> {
        let stations = read_stations(stations_path)?;
        let trips = read_trips(trips_path)?;

        info!(
            stations = stations.len(),
            trips = trips.len(),
            stations_path = %stations_path.display(),
            trips_path = %trips_path.display(),
            "Loaded schedule data"
        );

        Self::from_records(stations, &trips)
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// All stations in id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Find a station by name, ignoring case and treating `_` as a space.
    pub fn find_station_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.find_by_name(name)
    }

    /// All trips in table order.
    pub fn trips(&self) -> &TripTable {
        &self.trips
    }

    /// The routing engine.
    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    /// Whether a single trip runs from `from` to `to`.
    pub fn has_direct_connection(&self, from: StationId, to: StationId) -> bool {
        self.direct.has_direct_connection(from, to)
    }

    /// Whether any time-feasible itinerary runs from `from` to `to`.
    pub fn has_any_route(&self, from: StationId, to: StationId) -> bool {
        self.planner.has_any_route(from, to)
    }

    /// Cheapest itinerary from `from` to `to` under `model`.
    pub fn find_best_route(
        &self,
        from: StationId,
        to: StationId,
        model: CostModel,
    ) -> Result<Route, RouteError> {
        self.planner.find_best_route(from, to, model)
    }

    /// Cheapest itinerary whose first trip departs at or after `time`.
    pub fn find_best_route_departing_after(
        &self,
        from: StationId,
        to: StationId,
        model: CostModel,
        time: ClockTime,
    ) -> Result<Route, RouteError> {
        self.planner
            .plan(&RouteRequest::new(from, to, model).departing_after(time))
    }

    /// Answer an arbitrary route request.
    pub fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        self.planner.plan(request)
    }

    /// Trips leaving `station`; empty for an unknown station.
    pub fn trips_from(&self, station: StationId) -> &[Trip] {
        self.direct.trips_from(station)
    }

    /// Trips arriving at `station`; empty for an unknown station.
    pub fn trips_into(&self, station: StationId) -> &[Trip] {
        self.direct.trips_into(station)
    }

    /// Departures and arrivals for one station.
    pub fn station_schedule(&self, id: StationId) -> Option<StationSchedule<'_>> {
        let station = self.stations.get(id)?;
        Some(StationSchedule {
            station,
            departures: self.trips_from(id),
            arrivals: self.trips_into(id),
        })
    }

    /// Every station's schedule, in id order.
    pub fn full_schedule(&self) -> Vec<StationSchedule<'_>> {
        self.stations
            .iter()
            .filter_map(|station| self.station_schedule(station.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn id(raw: u32) -> StationId {
        StationId::new(raw)
    }

    fn greek_stations() -> Vec<StationRecord> {
        vec![
            StationRecord::new(1, "Alpha"),
            StationRecord::new(2, "Beta"),
            StationRecord::new(3, "Gamma"),
        ]
    }

    fn timetable(trips: &[(u32, u32, u32, u32)]) -> Timetable {
        let records: Vec<_> = trips
            .iter()
            .map(|&(o, d, dep, arr)| TripRecord::new(o, d, dep, arr))
            .collect();
        Timetable::from_records(greek_stations(), &records).unwrap()
    }

    #[test]
    fn connecting_journey_scenario() {
        let timetable = timetable(&[(1, 2, 800, 900), (2, 3, 930, 1030)]);

        assert!(!timetable.has_direct_connection(id(1), id(3)));
        assert!(timetable.has_direct_connection(id(1), id(2)));
        assert!(timetable.has_any_route(id(1), id(3)));

        let route = timetable
            .find_best_route(id(1), id(3), CostModel::TotalTravelTime)
            .unwrap();
        let legs: Vec<_> = route
            .legs()
            .iter()
            .map(|l| (l.origin().get(), l.destination().get(), l.departure().to_hhmm(), l.arrival().to_hhmm()))
            .collect();
        assert_eq!(legs, vec![(1, 2, 800, 900), (2, 3, 930, 1030)]);
        assert_eq!(route.cost_mins(), 150);
    }

    #[test]
    fn missed_connection_scenario() {
        let timetable = timetable(&[(1, 2, 800, 900), (2, 3, 850, 950)]);

        for model in CostModel::ALL {
            assert!(matches!(
                timetable.find_best_route(id(1), id(3), model),
                Err(RouteError::NoRoute { .. })
            ));
        }
        assert!(!timetable.has_any_route(id(1), id(3)));
    }

    #[test]
    fn invalid_station_scenario() {
        let timetable = timetable(&[(1, 2, 800, 900)]);

        for model in CostModel::ALL {
            assert_eq!(
                timetable.find_best_route(id(1), id(99), model),
                Err(RouteError::InvalidStation(id(99)))
            );
        }
        assert!(!timetable.has_direct_connection(id(1), id(99)));
    }

    #[test]
    fn departing_after_query() {
        let timetable = timetable(&[(1, 2, 800, 900), (1, 2, 1200, 1230)]);

        let route = timetable
            .find_best_route_departing_after(
                id(1),
                id(2),
                CostModel::RideTimeOnly,
                ClockTime::from_hhmm(1000).unwrap(),
            )
            .unwrap();
        assert_eq!(route.departure_time(), ClockTime::from_hhmm(1200).ok());
    }

    #[test]
    fn station_lookup() {
        let timetable = timetable(&[]);

        assert_eq!(timetable.station_count(), 3);
        assert_eq!(timetable.station(id(2)).unwrap().name, "Beta");
        assert!(timetable.station(id(4)).is_none());
        assert_eq!(timetable.find_station_by_name("GAMMA").unwrap().id, id(3));
        assert!(timetable.find_station_by_name("Delta").is_none());
    }

    #[test]
    fn station_schedules() {
        let timetable = timetable(&[(1, 2, 800, 900), (2, 3, 930, 1030), (3, 2, 1100, 1130)]);

        let beta = timetable.station_schedule(id(2)).unwrap();
        assert_eq!(beta.station.name, "Beta");
        assert_eq!(beta.departures.len(), 1);
        assert_eq!(beta.arrivals.len(), 2);
        assert_eq!(beta.arrivals[0].origin(), id(1));
        assert_eq!(beta.arrivals[1].origin(), id(3));

        assert!(timetable.station_schedule(id(9)).is_none());

        let all = timetable.full_schedule();
        let names: Vec<_> = all.iter().map(|s| s.station.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn malformed_records_prevent_construction() {
        let result = Timetable::from_records(greek_stations(), &[TripRecord::new(1, 4, 800, 900)]);
        assert!(matches!(result, Err(ScheduleError::MalformedInput { .. })));
    }

    #[test]
    fn loads_from_files() {
        let dir = tempdir().unwrap();
        let stations_path = dir.path().join("stations.dat");
        let trips_path = dir.path().join("trains.dat");
        fs::write(&stations_path, "2 Beta\n1 Alpha\n3 Gamma\n").unwrap();
        fs::write(&trips_path, "1 2 800 900\n2 3 930 1030\n").unwrap();

        let timetable = Timetable::load(&stations_path, &trips_path).unwrap();

        assert_eq!(timetable.station(id(1)).unwrap().name, "Alpha");
        assert_eq!(timetable.trips().len(), 2);
        assert_eq!(
            timetable
                .find_best_route(id(1), id(3), CostModel::TotalTravelTime)
                .unwrap()
                .cost_mins(),
            150
        );
    }

    #[test]
    fn load_reports_bad_line() {
        let dir = tempdir().unwrap();
        let stations_path = dir.path().join("stations.dat");
        let trips_path = dir.path().join("trains.dat");
        fs::write(&stations_path, "1 Alpha\n2 Beta\n").unwrap();
        fs::write(&trips_path, "1 2 800 900\n2 1 1900 1830\n").unwrap();

        match Timetable::load(&stations_path, &trips_path) {
            Err(ScheduleError::MalformedInput { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed input, got {other:?}"),
        }
    }
}
