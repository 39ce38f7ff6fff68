// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic single-source shortest paths over an [`AdjacencyView`].
//!
//! Classic Dijkstra with a binary heap and lazy deletion. Weights are
//! non-negative and capped at [`MAX_WEIGHT`](crate::MAX_WEIGHT) by the
//! builder, so a node's distance is final once it is popped from the
//! frontier and finite totals never overflow.
//!
//! Ties between equally distant frontier nodes are broken by the lowest
//! [`LocationId`], which makes the returned path reproducible for a given
//! view regardless of heap internals.
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::adjacency::AdjacencyView;
use crate::error::NotFoundError;
use crate::ident::LocationId;

/// Result of a shortest-path query.
///
/// When `end` is unreachable the path is empty and the distance is
/// `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Location ids from start to end inclusive.
    pub path: Vec<LocationId>,
    /// Sum of edge weights along `path`.
    pub distance: f64,
}

impl ShortestPath {
    /// The "no path" result.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    /// Returns `true` if a route was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges traversed (zero for a trivial or missing path).
    #[must_use]
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Frontier entry ordered so that `BinaryHeap` pops the smallest distance,
/// then the smallest id.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    id: LocationId,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// Computes the minimum-weight path from `start` to `end`.
///
/// Fails only if either endpoint is absent from `view`. Disconnected
/// endpoints yield [`ShortestPath::unreachable`].
#[instrument(level = "debug", skip(view), fields(nodes = view.len()))]
pub fn compute_shortest_path(
    view: &AdjacencyView,
    start: LocationId,
    end: LocationId,
) -> Result<ShortestPath, NotFoundError> {
    for id in [start, end] {
        if !view.contains(id) {
            return Err(NotFoundError(id));
        }
    }
    if start == end {
        return Ok(ShortestPath {
            path: vec![start],
            distance: 0.0,
        });
    }

    let mut distance: BTreeMap<LocationId, f64> = BTreeMap::new();
    let mut predecessor: BTreeMap<LocationId, LocationId> = BTreeMap::new();
    let mut settled: BTreeSet<LocationId> = BTreeSet::new();
    let mut frontier = BinaryHeap::new();

    distance.insert(start, 0.0);
    frontier.push(Frontier {
        distance: 0.0,
        id: start,
    });

    while let Some(Frontier { distance: d, id }) = frontier.pop() {
        if !settled.insert(id) {
            // Stale entry superseded by a shorter one.
            continue;
        }
        trace!(%id, distance = d, "settled");
        if id == end {
            break;
        }
        let Some(neighbors) = view.neighbors(id) else {
            continue;
        };
        for (&next, &weight) in neighbors {
            if settled.contains(&next) {
                continue;
            }
            let candidate = d + weight;
            let known = distance.get(&next).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                distance.insert(next, candidate);
                predecessor.insert(next, id);
                frontier.push(Frontier {
                    distance: candidate,
                    id: next,
                });
            }
        }
    }

    let path = reconstruct(&predecessor, start, end);
    if path.first() != Some(&start) {
        return Ok(ShortestPath::unreachable());
    }
    let total = distance.get(&end).copied().unwrap_or(f64::INFINITY);
    Ok(ShortestPath {
        path,
        distance: total,
    })
}

/// Walks predecessor links back from `end`.
///
/// Stops at `start` or at the first node without a predecessor; the caller
/// decides whether the chain actually reached `start`.
fn reconstruct(
    predecessor: &BTreeMap<LocationId, LocationId>,
    start: LocationId,
    end: LocationId,
) -> Vec<LocationId> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match predecessor.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
