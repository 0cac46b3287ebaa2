//! Best-route queries over the precomputed routing tables.
//!
//! A query tries every departure event at the origin station against every
//! sink of the destination station, rebuilds each candidate itinerary by
//! following next hops, and keeps the cheapest.

use crate::domain::{ClockTime, StationId, Trip};

use super::event_graph::{EventGraph, NodeKey};
use super::shortest_path::{CostModel, RoutingTable};

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Station id outside the schedule
    #[error("station {0} is not in the schedule")]
    InvalidStation(StationId),

    /// Both stations are valid but no itinerary connects them
    #[error("no route from station {from} to station {to}")]
    NoRoute { from: StationId, to: StationId },
}

/// Request for a best-route query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    /// Departure station.
    pub from: StationId,

    /// Destination station.
    pub to: StationId,

    /// How candidate itineraries are compared.
    pub cost_model: CostModel,

    /// Only consider first trips departing at or after this time.
    pub depart_after: Option<ClockTime>,
}

impl RouteRequest {
    /// Create a new request with no departure-time restriction.
    pub fn new(from: StationId, to: StationId, cost_model: CostModel) -> Self {
        Self {
            from,
            to,
            cost_model,
            depart_after: None,
        }
    }

    /// Restrict the first trip to depart no earlier than `time`.
    pub fn departing_after(mut self, time: ClockTime) -> Self {
        self.depart_after = Some(time);
        self
    }

    /// Validate both stations against a schedule of `station_count` stations.
    pub fn validate(&self, station_count: usize) -> Result<(), RouteError> {
        for station in [self.from, self.to] {
            if station.index_within(station_count).is_none() {
                return Err(RouteError::InvalidStation(station));
            }
        }
        Ok(())
    }
}

/// One trip taken as part of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLeg {
    /// Event (and trip-table index) this leg departs on
    pub event: NodeKey,
    /// The trip ridden on this leg
    pub trip: Trip,
    /// Wait at this leg's destination before the next leg; 0 on the last leg
    pub layover_after_mins: u32,
}

impl RouteLeg {
    /// Boarding station.
    pub fn origin(&self) -> StationId {
        self.trip.origin()
    }

    /// Alighting station.
    pub fn destination(&self) -> StationId {
        self.trip.destination()
    }

    /// Departure time of the leg's trip.
    pub fn departure(&self) -> ClockTime {
        self.trip.departure()
    }

    /// Arrival time of the leg's trip.
    pub fn arrival(&self) -> ClockTime {
        self.trip.arrival()
    }

    /// Minutes aboard on this leg.
    pub fn ride_mins(&self) -> u32 {
        self.trip.ride_mins()
    }
}

/// A reconstructed itinerary.
///
/// A route between a station and itself is trivial: no legs, cost 0, and no
/// departure event or sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    legs: Vec<RouteLeg>,
    cost_mins: u32,
    cost_model: CostModel,
    departure_event: Option<NodeKey>,
    destination_sink: Option<NodeKey>,
}

impl Route {
    /// The zero-leg route from a station to itself.
    pub fn trivial(cost_model: CostModel) -> Self {
        Self {
            legs: Vec::new(),
            cost_mins: 0,
            cost_model,
            departure_event: None,
            destination_sink: None,
        }
    }

    /// Legs in travel order.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Cost under [`Route::cost_model`], in minutes.
    pub fn cost_mins(&self) -> u32 {
        self.cost_mins
    }

    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// The departure event the route starts from.
    pub fn departure_event(&self) -> Option<NodeKey> {
        self.departure_event
    }

    /// The sink the route ends in.
    pub fn destination_sink(&self) -> Option<NodeKey> {
        self.destination_sink
    }

    /// Whether this is the zero-leg route.
    pub fn is_trivial(&self) -> bool {
        self.legs.is_empty()
    }

    /// Departure time of the first leg.
    pub fn departure_time(&self) -> Option<ClockTime> {
        self.legs.first().map(|leg| leg.departure())
    }

    /// Arrival time of the last leg.
    pub fn arrival_time(&self) -> Option<ClockTime> {
        self.legs.last().map(|leg| leg.arrival())
    }

    /// Minutes aboard, summed over legs.
    pub fn ride_mins(&self) -> u32 {
        self.legs.iter().map(|leg| leg.ride_mins()).sum()
    }

    /// Minutes from first departure to last arrival.
    pub fn total_mins(&self) -> u32 {
        match (self.departure_time(), self.arrival_time()) {
            (Some(dep), Some(arr)) => dep.minutes_until(arr).max(0) as u32,
            _ => 0,
        }
    }

    /// Number of changes between trains.
    pub fn change_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }
}

/// The routing engine: event graph plus one routing table per cost model.
///
/// Built once; every query afterwards is read-only.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    graph: EventGraph,
    ride_table: RoutingTable,
    total_table: RoutingTable,
    station_count: usize,
}

impl RoutePlanner {
    /// Build the event graph and both routing tables.
    pub fn new(trips: &[Trip], station_count: usize) -> Self {
        let graph = EventGraph::new(trips, station_count);
        let ride_table = RoutingTable::compute(&graph, CostModel::RideTimeOnly);
        let total_table = RoutingTable::compute(&graph, CostModel::TotalTravelTime);

        Self {
            graph,
            ride_table,
            total_table,
            station_count,
        }
    }

    /// The underlying event graph.
    pub fn graph(&self) -> &EventGraph {
        &self.graph
    }

    /// The routing table for a cost model.
    pub fn table(&self, model: CostModel) -> &RoutingTable {
        match model {
            CostModel::RideTimeOnly => &self.ride_table,
            CostModel::TotalTravelTime => &self.total_table,
        }
    }

    /// Cheapest route from `from` to `to` under `model`.
    pub fn find_best_route(
        &self,
        from: StationId,
        to: StationId,
        model: CostModel,
    ) -> Result<Route, RouteError> {
        self.plan(&RouteRequest::new(from, to, model))
    }

    /// Whether any time-feasible itinerary connects `from` to `to`.
    pub fn has_any_route(&self, from: StationId, to: StationId) -> bool {
        self.find_best_route(from, to, CostModel::TotalTravelTime)
            .is_ok()
    }

    /// Answer a route request.
    pub fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        request.validate(self.station_count)?;

        if request.from == request.to {
            return Ok(Route::trivial(request.cost_model));
        }

        let table = self.table(request.cost_model);
        let mut best: Option<Route> = None;

        let starts = self
            .graph
            .departures_at(request.from)
            .filter(|event| request.depart_after.is_none_or(|t| event.departure() >= t));

        for start in starts {
            for sink in self.graph.sinks_at(request.to) {
                // Skip pairs the table already knows are unreachable
                if table.distance(start.key(), sink.key()).is_none() {
                    continue;
                }
                let Some(route) = self.reconstruct(table, request.cost_model, start.key(), sink.key())
                else {
                    continue;
                };
                if best
                    .as_ref()
                    .is_none_or(|b| route.cost_mins < b.cost_mins)
                {
                    best = Some(route);
                }
            }
        }

        best.ok_or(RouteError::NoRoute {
            from: request.from,
            to: request.to,
        })
    }

    /// Follow next hops from `start` until `sink` is reached.
    ///
    /// Returns `None` if the table has no next hop, the walk ends in a
    /// different sink, or it takes more steps than there are nodes.
    fn reconstruct(
        &self,
        table: &RoutingTable,
        model: CostModel,
        start: NodeKey,
        sink: NodeKey,
    ) -> Option<Route> {
        let mut legs = Vec::new();
        let mut cost_mins = 0u32;
        let mut current = start;

        for _ in 0..=self.graph.node_count() {
            if current == sink {
                return Some(Route {
                    legs,
                    cost_mins,
                    cost_model: model,
                    departure_event: Some(start),
                    destination_sink: Some(sink),
                });
            }

            let event = self.graph.departure(current)?;
            let next = table.next_hop(current, sink)?;
            let connection = event
                .connections()
                .iter()
                .filter(|c| c.target == next)
                .min_by_key(|c| model.weight(c))?;

            cost_mins = cost_mins.checked_add(model.weight(connection))?;
            legs.push(RouteLeg {
                event: current,
                trip: *event.trip(),
                layover_after_mins: connection.layover_mins,
            });
            current = next;
        }

        None
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
