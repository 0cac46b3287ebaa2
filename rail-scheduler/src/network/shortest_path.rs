//! All-pairs shortest paths over the event graph.
//!
//! The schedule is small and static, so both routing tables are computed up
//! front with Floyd–Warshall (O(V³) time, O(V²) space) and every later query
//! is a table lookup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::event_graph::{Connection, EventGraph, NodeKey};

/// How an itinerary's cost is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Minutes spent aboard trains; waiting is free
    #[serde(alias = "ride")]
    RideTimeOnly,
    /// Door-to-door minutes: riding plus layovers
    #[serde(alias = "total")]
    TotalTravelTime,
}

impl CostModel {
    /// Both models, in table-building order.
    pub const ALL: [CostModel; 2] = [CostModel::RideTimeOnly, CostModel::TotalTravelTime];

    /// Edge weight under this model.
    pub fn weight(&self, connection: &Connection) -> u32 {
        match self {
            CostModel::RideTimeOnly => connection.ride_mins,
            CostModel::TotalTravelTime => connection.total_mins(),
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            CostModel::RideTimeOnly => "shortest riding time",
            CostModel::TotalTravelTime => "shortest overall travel time",
        }
    }
}

/// Error returned when a cost model name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cost model {0:?}; expected ride or total")]
pub struct UnknownCostModel(String);

impl FromStr for CostModel {
    type Err = UnknownCostModel;

    /// Accepts the wire names and the short forms `ride` and `total`,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ride" | "ride_time_only" => Ok(CostModel::RideTimeOnly),
            "total" | "total_travel_time" => Ok(CostModel::TotalTravelTime),
            _ => Err(UnknownCostModel(s.to_string())),
        }
    }
}

/// Distance and next-hop matrices from one all-pairs computation.
///
/// Both matrices are `size × size`, addressed by [`NodeKey`]. A `None`
/// distance means unreachable; `next_hop[i][j]` is the first node after `i`
/// on a shortest path to `j`.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    size: usize,
    distance: Vec<Option<u32>>,
    next_hop: Vec<Option<NodeKey>>,
}

impl RoutingTable {
    /// Compute the table for `graph` weighted by `model`.
    pub fn compute(graph: &EventGraph, model: CostModel) -> Self {
        let edges = graph.departures().iter().flat_map(|event| {
            event
                .connections()
                .iter()
                .map(move |c| (event.key(), c.target, model.weight(c)))
        });
        Self::from_edges(graph.node_count(), edges)
    }

    /// Compute the table for an arbitrary weighted edge list.
    ///
    /// Parallel edges keep the lightest weight. Edges naming a node outside
    /// `0..size` are ignored.
    pub fn from_edges(size: usize, edges: impl IntoIterator<Item = (NodeKey, NodeKey, u32)>) -> Self {
        let mut table = Self {
            size,
            distance: vec![None; size * size],
            next_hop: vec![None; size * size],
        };

        for i in 0..size {
            table.distance[i * size + i] = Some(0);
        }

        for (from, to, weight) in edges {
            if from.0 >= size || to.0 >= size || from == to {
                continue;
            }
            let cell = from.0 * size + to.0;
            if table.distance[cell].is_none_or(|d| weight < d) {
                table.distance[cell] = Some(weight);
                table.next_hop[cell] = Some(to);
            }
        }

        table.relax();
        table
    }

    /// Floyd–Warshall relaxation. Ties keep the earlier-found path.
    fn relax(&mut self) {
        let n = self.size;
        for k in 0..n {
            for i in 0..n {
                let Some(d_ik) = self.distance[i * n + k] else {
                    continue;
                };
                if i == k {
                    continue;
                }
                let hop_ik = self.next_hop[i * n + k];

                for j in 0..n {
                    let Some(d_kj) = self.distance[k * n + j] else {
                        continue;
                    };
                    let Some(candidate) = d_ik.checked_add(d_kj) else {
                        continue;
                    };
                    let cell = i * n + j;
                    if self.distance[cell].is_none_or(|d| candidate < d) {
                        self.distance[cell] = Some(candidate);
                        self.next_hop[cell] = hop_ik;
                    }
                }
            }
        }
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Shortest distance from `from` to `to`, `None` if unreachable.
    pub fn distance(&self, from: NodeKey, to: NodeKey) -> Option<u32> {
        self.cell(from, to).and_then(|cell| self.distance[cell])
    }

    /// First step from `from` toward `to`, `None` if there is none.
    pub fn next_hop(&self, from: NodeKey, to: NodeKey) -> Option<NodeKey> {
        self.cell(from, to).and_then(|cell| self.next_hop[cell])
    }

    fn cell(&self, from: NodeKey, to: NodeKey) -> Option<usize> {
        (from.0 < self.size && to.0 < self.size).then(|| from.0 * self.size + to.0)
    }
}
