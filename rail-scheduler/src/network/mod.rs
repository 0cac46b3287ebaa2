//! Time-expanded route planning.
//!
//! This module implements the routing engine that answers "what is the best
//! way from station A to station B on this schedule?":
//!
//! - [`DirectConnectionGraph`] answers nonstop questions from plain adjacency.
//! - [`EventGraph`] turns every scheduled trip into a node so that connection
//!   feasibility (catching a train that leaves after you arrive) is part of
//!   the graph itself.
//! - [`RoutingTable`] holds all-pairs shortest paths over that graph, one per
//!   [`CostModel`].
//! - [`RoutePlanner`] reconstructs concrete itineraries from the tables.
//!
//! Everything is computed once from the trip table and is read-only after.
//! The engine never logs; it returns typed results.

mod direct;
mod event_graph;
mod query;
mod shortest_path;

pub use direct::DirectConnectionGraph;
pub use event_graph::{Connection, DepartureEvent, EventGraph, EventNode, NodeKey, Sink};
pub use query::{Route, RouteError, RouteLeg, RoutePlanner, RouteRequest};
pub use shortest_path::{CostModel, RoutingTable, UnknownCostModel};
