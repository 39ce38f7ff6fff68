// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only adjacency snapshots consumed by the solver.
use std::collections::BTreeMap;

use crate::ident::LocationId;
use crate::location::{Connection, Location};

/// Neighbor map of a single location: neighbor id → edge weight.
pub type Neighbors = BTreeMap<LocationId, f64>;

/// Snapshot of the network as an undirected weighted adjacency map.
///
/// Every location is a key, including isolated ones. Parallel connections
/// collapse to their minimum weight. The view owns its data, so later
/// builder mutations never show through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyView {
    nodes: BTreeMap<LocationId, Neighbors>,
}

impl AdjacencyView {
    /// Materializes a view from locations and the connections between them.
    ///
    /// Connections whose endpoints are not among `locations` are skipped.
    pub fn from_parts<'a>(
        locations: impl IntoIterator<Item = &'a Location>,
        connections: impl IntoIterator<Item = &'a Connection>,
    ) -> Self {
        let mut nodes: BTreeMap<LocationId, Neighbors> = locations
            .into_iter()
            .map(|loc| (loc.id, Neighbors::new()))
            .collect();
        for conn in connections {
            if !nodes.contains_key(&conn.from) || !nodes.contains_key(&conn.to) {
                continue;
            }
            for (a, b) in [(conn.from, conn.to), (conn.to, conn.from)] {
                if let Some(neighbors) = nodes.get_mut(&a) {
                    neighbors
                        .entry(b)
                        .and_modify(|w| *w = w.min(conn.weight))
                        .or_insert(conn.weight);
                }
            }
        }
        Self { nodes }
    }

    /// Returns `true` if `id` is a node of this view.
    #[must_use]
    pub fn contains(&self, id: LocationId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Neighbors of `id`, or `None` if `id` is not in the view.
    pub fn neighbors(&self, id: LocationId) -> Option<&Neighbors> {
        self.nodes.get(&id)
    }

    /// Weight of the edge between `a` and `b`, if they are adjacent.
    pub fn weight(&self, a: LocationId, b: LocationId) -> Option<f64> {
        self.nodes.get(&a).and_then(|n| n.get(&b)).copied()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the view has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct undirected edges after duplicate collapsing.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|(id, n)| n.keys().filter(|other| *other > id).count())
            .sum()
    }

    /// Iterate nodes and their neighbor maps in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, &Neighbors)> {
        self.nodes.iter()
    }
}
