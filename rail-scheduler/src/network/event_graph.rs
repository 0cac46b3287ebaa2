//! Time-expanded departure-event graph.
//!
//! A plain station graph cannot say "you may only board a train that leaves
//! after you arrive", because whether two trips connect depends on when they
//! run. Here every scheduled trip is its own node (a [`DepartureEvent`]), and
//! an edge from one trip to another exists only when the second can actually
//! be caught after the first arrives.
//!
//! Each station also gets one terminal [`Sink`] node meaning "journey ends
//! here". Sinks share the key space with departure events:
//!
//! ```text
//! keys 0 .. T        departure events, key = trip index
//! keys T .. T + N    sinks, key = T + station index
//! ```
//!
//! so a single all-pairs computation answers "best way to finish at station
//! S" by looking at distances to S's sink.

use crate::domain::{ClockTime, StationId, Trip};

/// Index of a node in the event graph and its routing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(pub usize);

/// A directed edge out of a departure event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Node reached by this edge
    pub target: NodeKey,
    /// Minutes aboard the source event's trip
    pub ride_mins: u32,
    /// Minutes waiting for the target departure (0 into a sink)
    pub layover_mins: u32,
}

impl Connection {
    /// Ride plus layover.
    pub fn total_mins(&self) -> u32 {
        self.ride_mins + self.layover_mins
    }
}

/// One scheduled departure: a node per trip.
#[derive(Debug, Clone)]
pub struct DepartureEvent {
    key: NodeKey,
    trip: Trip,
    connections: Vec<Connection>,
}

impl DepartureEvent {
    /// Node key; equal to the trip's index in the trip table.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// The trip this event departs on.
    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Station the event departs from.
    pub fn station(&self) -> StationId {
        self.trip.origin()
    }

    /// Departure time.
    pub fn departure(&self) -> ClockTime {
        self.trip.departure()
    }

    /// Outbound edges: the destination sink first, then feasible onward
    /// departures in trip-table order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

/// Terminal node: arrived and stopped at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sink {
    key: NodeKey,
    station: StationId,
}

impl Sink {
    /// Node key; `T + station index`.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// The station this sink ends journeys at.
    pub fn station(&self) -> StationId {
        self.station
    }
}

/// A node of either kind.
#[derive(Debug, Clone, Copy)]
pub enum EventNode<'a> {
    Departure(&'a DepartureEvent),
    Sink(&'a Sink),
}

/// The frozen time-expanded graph.
///
/// # Invariants
///
/// - `node_count() == trips + stations`
/// - Every departure event has an edge to its destination's sink
/// - Sinks have no outbound edges
/// - Nothing is added after construction
#[derive(Debug, Clone)]
pub struct EventGraph {
    departures: Vec<DepartureEvent>,
    sinks: Vec<Sink>,
}

impl EventGraph {
    /// Build the graph for `trips` over `station_count` stations.
    ///
    /// Trips must reference stations in `1..=station_count`, as guaranteed
    /// by `TripTable`.
    pub fn new(trips: &[Trip], station_count: usize) -> Self {
        let sink_base = trips.len();
        let sinks: Vec<Sink> = (0..station_count)
            .map(|idx| Sink {
                key: NodeKey(sink_base + idx),
                station: StationId::from_index(idx),
            })
            .collect();

        // Trip indices grouped by departure station, in table order
        let mut leaving: Vec<Vec<usize>> = vec![Vec::new(); station_count];
        for (idx, trip) in trips.iter().enumerate() {
            if let Some(slot) = trip.origin().index_within(station_count) {
                leaving[slot].push(idx);
            }
        }

        let departures = trips
            .iter()
            .enumerate()
            .map(|(idx, trip)| {
                let mut connections = Vec::new();

                if let Some(slot) = trip.destination().index_within(station_count) {
                    connections.push(Connection {
                        target: sinks[slot].key,
                        ride_mins: trip.ride_mins(),
                        layover_mins: 0,
                    });

                    for &next_idx in &leaving[slot] {
                        let next = &trips[next_idx];
                        if next_idx != idx && trip.connects_to(next) {
                            connections.push(Connection {
                                target: NodeKey(next_idx),
                                ride_mins: trip.ride_mins(),
                                layover_mins: trip.layover_before(next),
                            });
                        }
                    }
                }

                DepartureEvent {
                    key: NodeKey(idx),
                    trip: *trip,
                    connections,
                }
            })
            .collect();

        Self { departures, sinks }
    }

    /// Total number of nodes (departure events plus sinks).
    pub fn node_count(&self) -> usize {
        self.departures.len() + self.sinks.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.departures.iter().map(|d| d.connections.len()).sum()
    }

    /// All departure events, in key order.
    pub fn departures(&self) -> &[DepartureEvent] {
        &self.departures
    }

    /// All sinks, in key order.
    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    /// Look up any node.
    pub fn node(&self, key: NodeKey) -> Option<EventNode<'_>> {
        if let Some(departure) = self.departures.get(key.0) {
            return Some(EventNode::Departure(departure));
        }
        self.sink(key).map(EventNode::Sink)
    }

    /// Look up a departure event.
    pub fn departure(&self, key: NodeKey) -> Option<&DepartureEvent> {
        self.departures.get(key.0)
    }

    /// Look up a sink.
    pub fn sink(&self, key: NodeKey) -> Option<&Sink> {
        key.0
            .checked_sub(self.departures.len())
            .and_then(|idx| self.sinks.get(idx))
    }

    /// Whether `key` is a sink.
    pub fn is_sink(&self, key: NodeKey) -> bool {
        self.sink(key).is_some()
    }

    /// Outbound edges of a node; empty for sinks and unknown keys.
    pub fn connections(&self, key: NodeKey) -> &[Connection] {
        self.departure(key)
            .map(|d| d.connections())
            .unwrap_or(&[])
    }

    /// Departure events leaving `station`, in key order.
    pub fn departures_at(&self, station: StationId) -> impl Iterator<Item = &DepartureEvent> {
        self.departures
            .iter()
            .filter(move |d| d.station() == station)
    }

    /// Sinks belonging to `station`. Currently always exactly one for a
    /// valid station.
    pub fn sinks_at(&self, station: StationId) -> impl Iterator<Item = &Sink> {
        self.sinks.iter().filter(move |s| s.station == station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(origin: u32, destination: u32, dep: u32, arr: u32) -> Trip {
        Trip::new(
            StationId::new(origin),
            StationId::new(destination),
            ClockTime::from_hhmm(dep).unwrap(),
            ClockTime::from_hhmm(arr).unwrap(),
        )
        .unwrap()
    }

    fn id(raw: u32) -> StationId {
        StationId::new(raw)
    }

    #[test]
    fn node_count_is_trips_plus_stations() {
        let graph = EventGraph::new(&[trip(1, 2, 800, 900), trip(2, 3, 930, 1030)], 3);

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.departures().len(), 2);
        assert_eq!(graph.sinks().len(), 3);
    }

    #[test]
    fn sink_keys_follow_departure_keys() {
        let graph = EventGraph::new(&[trip(1, 2, 800, 900), trip(2, 3, 930, 1030)], 3);

        assert_eq!(graph.departures()[1].key(), NodeKey(1));
        let sink_keys: Vec<_> = graph.sinks().iter().map(|s| s.key()).collect();
        assert_eq!(sink_keys, vec![NodeKey(2), NodeKey(3), NodeKey(4)]);
        assert_eq!(graph.sink(NodeKey(3)).unwrap().station(), id(2));
        assert!(graph.is_sink(NodeKey(4)));
        assert!(!graph.is_sink(NodeKey(0)));
        assert!(graph.node(NodeKey(5)).is_none());
    }

    #[test]
    fn every_departure_reaches_its_destination_sink() {
        let graph = EventGraph::new(&[trip(1, 2, 800, 900), trip(2, 3, 930, 1030)], 3);

        let first = &graph.departures()[0].connections()[0];
        assert_eq!(first.target, NodeKey(3)); // sink of station 2
        assert_eq!(first.ride_mins, 60);
        assert_eq!(first.layover_mins, 0);
    }

    #[test]
    fn feasible_connection_carries_layover() {
        let graph = EventGraph::new(&[trip(1, 2, 800, 900), trip(2, 3, 930, 1030)], 3);

        let edges = graph.connections(NodeKey(0));
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1], Connection {
            target: NodeKey(1),
            ride_mins: 60,
            layover_mins: 30,
        });
        assert_eq!(edges[1].total_mins(), 90);
    }

    #[test]
    fn departure_before_arrival_is_not_connected() {
        let graph = EventGraph::new(&[trip(1, 2, 800, 900), trip(2, 3, 850, 950)], 3);

        let targets: Vec<_> = graph
            .connections(NodeKey(0))
            .iter()
            .map(|c| c.target)
            .collect();
        assert_eq!(targets, vec![graph.sinks()[1].key()]);
    }

    #[test]
    fn equal_times_connect_with_zero_layover() {
        let graph = EventGraph::new(&[trip(1, 2, 800, 900), trip(2, 3, 900, 1000)], 3);

        let onward = graph.connections(NodeKey(0))[1];
        assert_eq!(onward.target, NodeKey(1));
        assert_eq!(onward.layover_mins, 0);
    }

    #[test]
    fn every_feasible_continuation_is_inserted() {
        let graph = EventGraph::new(
            &[
                trip(1, 2, 800, 900),
                trip(2, 3, 910, 1000),
                trip(2, 3, 1000, 1030),
                trip(2, 1, 1100, 1200),
            ],
            3,
        );

        let targets: Vec<_> = graph
            .connections(NodeKey(0))
            .iter()
            .map(|c| c.target)
            .collect();
        assert_eq!(targets, vec![NodeKey(5), NodeKey(1), NodeKey(2), NodeKey(3)]);
        // Onward trips only have their sink edge; nothing leaves later from 3 or 1
        assert_eq!(graph.edge_count(), 4 + 1 + 1 + 1);
    }

    #[test]
    fn sinks_have_no_edges() {
        let graph = EventGraph::new(&[trip(1, 2, 800, 900)], 2);
        for sink in graph.sinks() {
            assert!(graph.connections(sink.key()).is_empty());
        }
    }

    #[test]
    fn departures_and_sinks_by_station() {
        let graph = EventGraph::new(
            &[trip(1, 2, 800, 900), trip(2, 1, 930, 1030), trip(1, 2, 1100, 1200)],
            2,
        );

        let keys: Vec<_> = graph.departures_at(id(1)).map(|d| d.key()).collect();
        assert_eq!(keys, vec![NodeKey(0), NodeKey(2)]);
        assert_eq!(graph.sinks_at(id(2)).count(), 1);
        assert_eq!(graph.sinks_at(id(9)).count(), 0);
    }
}
