// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Authoritative mutable store of locations, connections, and the route
//! endpoint selection.
use std::collections::BTreeMap;

use tracing::debug;

use crate::adjacency::AdjacencyView;
use crate::error::{GraphError, NotFoundError, ValidationError};
use crate::ident::{ConnectionId, IdAllocator, LocationId};
use crate::location::{validate_location, validate_weight, Category, Connection, Location};
use crate::selection::{EndpointPolicy, PathSelection, SelectionChange};
use crate::solver::{compute_shortest_path, ShortestPath};

/// Owns the network for one session.
///
/// All mutation goes through methods so the connection set can never refer
/// to a missing location. Failed calls leave the builder untouched.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    pub(crate) locations: BTreeMap<LocationId, Location>,
    /// Connections in insertion order (ids are monotonic).
    pub(crate) connections: Vec<Connection>,
    pub(crate) selection: PathSelection,
    pub(crate) policy: EndpointPolicy,
    pub(crate) location_ids: IdAllocator,
    pub(crate) connection_ids: IdAllocator,
}

impl GraphBuilder {
    /// Creates an empty builder with the default endpoint policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with `policy` for endpoint selection.
    #[must_use]
    pub fn with_policy(policy: EndpointPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Active endpoint policy.
    #[must_use]
    pub fn policy(&self) -> EndpointPolicy {
        self.policy
    }

    /// Replaces the endpoint policy. The current selection is kept.
    pub fn set_policy(&mut self, policy: EndpointPolicy) {
        self.policy = policy;
    }

    /// Adds a location and returns its freshly allocated id.
    pub fn add_location(
        &mut self,
        name: &str,
        category: Category,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationId, ValidationError> {
        let name = validate_location(name, latitude, longitude)?;
        let id = self
            .location_ids
            .allocate()
            .map(LocationId)
            .ok_or(ValidationError::IdsExhausted("location"))?;
        debug!(%id, %name, %category, "add location");
        self.locations.insert(
            id,
            Location {
                id,
                name,
                category,
                latitude,
                longitude,
            },
        );
        Ok(id)
    }

    /// Removes a location, its incident connections, and any endpoint
    /// selection pointing at it. Unknown ids are a no-op returning `None`.
    pub fn remove_location(&mut self, id: LocationId) -> Option<Location> {
        let removed = self.locations.remove(&id)?;
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        self.selection.forget(id);
        debug!(
            %id,
            dropped_connections = before - self.connections.len(),
            "remove location"
        );
        Some(removed)
    }

    /// Adds an undirected connection. Parallel connections are allowed.
    pub fn add_connection(
        &mut self,
        from: LocationId,
        to: LocationId,
        weight: f64,
    ) -> Result<ConnectionId, ValidationError> {
        if from == to {
            return Err(ValidationError::SelfLoop(from));
        }
        for id in [from, to] {
            if !self.locations.contains_key(&id) {
                return Err(ValidationError::UnknownLocation(id));
            }
        }
        validate_weight(weight)?;
        let id = self
            .connection_ids
            .allocate()
            .map(ConnectionId)
            .ok_or(ValidationError::IdsExhausted("connection"))?;
        debug!(%id, %from, %to, weight, "add connection");
        self.connections.push(Connection {
            id,
            from,
            to,
            weight,
        });
        Ok(id)
    }

    /// Adds a connection weighted by great-circle kilometres between the
    /// two locations.
    pub fn connect_by_distance(
        &mut self,
        from: LocationId,
        to: LocationId,
    ) -> Result<ConnectionId, ValidationError> {
        let weight = match (self.locations.get(&from), self.locations.get(&to)) {
            (Some(a), Some(b)) => a.distance_km(b),
            // Let `add_connection` report the precise failure.
            _ => 0.0,
        };
        self.add_connection(from, to, weight)
    }

    /// Removes a single connection by id.
    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let idx = self.connections.iter().position(|c| c.id == id)?;
        debug!(%id, "remove connection");
        Some(self.connections.remove(idx))
    }

    /// Drops every location, connection, and selection.
    ///
    /// Id counters keep running, so ids from before the clear are never
    /// handed out again.
    pub fn clear(&mut self) {
        debug!(
            locations = self.locations.len(),
            connections = self.connections.len(),
            "clear network"
        );
        self.locations.clear();
        self.connections.clear();
        self.selection.clear();
    }

    /// Snapshot of the current network as an adjacency map.
    #[must_use]
    pub fn materialize_adjacency(&self) -> AdjacencyView {
        AdjacencyView::from_parts(self.locations.values(), &self.connections)
    }

    /// Looks up a location.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// All locations in id order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All connections in insertion order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections touching `id`.
    pub fn connections_of(&self, id: LocationId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.touches(id))
    }

    /// Number of locations.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Current endpoint selection.
    #[must_use]
    pub fn selection(&self) -> &PathSelection {
        &self.selection
    }

    /// Toggles `id` in the endpoint selection under the active policy.
    pub fn select_endpoint(&mut self, id: LocationId) -> Result<SelectionChange, GraphError> {
        let category = self
            .locations
            .get(&id)
            .map(|loc| loc.category)
            .ok_or(NotFoundError(id))?;
        let change = self.selection.toggle(id, category, self.policy)?;
        debug!(?change, "endpoint selection");
        Ok(change)
    }

    /// Clears the endpoint selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Shortest path between the selected endpoints.
    pub fn shortest_path(&self) -> Result<ShortestPath, GraphError> {
        let (start, end) = self
            .selection
            .endpoints()
            .ok_or(GraphError::IncompleteSelection)?;
        Ok(compute_shortest_path(
            &self.materialize_adjacency(),
            start,
            end,
        )?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::location::MAX_WEIGHT;

    fn triangle() -> (GraphBuilder, LocationId, LocationId, LocationId) {
        let mut g = GraphBuilder::new();
        let a = g.add_location("A", Category::Warehouse, 0.0, 0.0).unwrap();
        let b = g.add_location("B", Category::Junction, 0.0, 1.0).unwrap();
        let c = g.add_location("C", Category::Store, 0.0, 2.0).unwrap();
        g.add_connection(a, b, 5.0).unwrap();
        g.add_connection(b, c, 3.0).unwrap();
        g.add_connection(a, c, 10.0).unwrap();
        (g, a, b, c)
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let (g, a, b, c) = triangle();
        assert!(a < b && b < c);
        assert_eq!(g.location_count(), 3);
    }

    #[test]
    fn failed_mutations_leave_state_untouched() {
        let (mut g, a, b, _) = triangle();
        let before_conns = g.connections().to_vec();
        assert_eq!(
            g.add_location("", Category::Store, 0.0, 0.0),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            g.add_connection(a, a, 1.0),
            Err(ValidationError::SelfLoop(a))
        );
        assert_eq!(
            g.add_connection(a, LocationId(99), 1.0),
            Err(ValidationError::UnknownLocation(LocationId(99)))
        );
        assert_eq!(
            g.add_connection(a, b, -1.0),
            Err(ValidationError::Weight(-1.0))
        );
        assert!(g.add_connection(a, b, f64::NAN).is_err());
        assert_eq!(
            g.add_connection(a, b, f64::MAX),
            Err(ValidationError::Weight(f64::MAX))
        );
        assert_eq!(g.location_count(), 3);
        assert_eq!(g.connections(), before_conns.as_slice());
        // The failed add did not burn an id slot visible to callers.
        let d = g.add_location("D", Category::Other, 1.0, 1.0).unwrap();
        assert_eq!(d, LocationId(4));
    }

    #[test]
    fn removing_a_location_cascades() {
        let (mut g, a, b, c) = triangle();
        let removed = g.remove_location(b).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(g.connections().len(), 1);
        assert!(g.connections_of(b).next().is_none());
        assert_eq!(g.connections()[0].weight, 10.0);
        assert!(g.connections()[0].touches(a) && g.connections()[0].touches(c));
    }

    #[test]
    fn removing_unknown_location_is_noop() {
        let (mut g, ..) = triangle();
        assert!(g.remove_location(LocationId(42)).is_none());
        assert_eq!(g.location_count(), 3);
        assert_eq!(g.connections().len(), 3);
    }

    #[test]
    fn removing_a_selected_location_clears_that_endpoint() {
        let (mut g, a, _, c) = triangle();
        g.select_endpoint(a).unwrap();
        g.select_endpoint(c).unwrap();
        g.remove_location(c);
        assert_eq!(g.selection().start(), Some(a));
        assert_eq!(g.selection().end(), None);
        assert_eq!(g.shortest_path(), Err(GraphError::IncompleteSelection));
    }

    #[test]
    fn adjacency_is_a_snapshot() {
        let (mut g, a, b, _) = triangle();
        let view = g.materialize_adjacency();
        g.remove_location(b);
        assert!(view.contains(b));
        assert_eq!(view.weight(a, b), Some(5.0));
        assert!(!g.materialize_adjacency().contains(b));
    }

    #[test]
    fn route_for_selection() {
        let (mut g, a, b, c) = triangle();
        g.select_endpoint(a).unwrap();
        g.select_endpoint(c).unwrap();
        let route = g.shortest_path().unwrap();
        assert_eq!(route.path, vec![a, b, c]);
        assert_eq!(route.distance, 8.0);
    }

    #[test]
    fn heaviest_weights_still_sum_to_a_finite_route() {
        let (mut g, a, b, c) = triangle();
        for conn in g.connections().to_vec() {
            g.remove_connection(conn.id);
        }
        g.add_connection(a, b, MAX_WEIGHT).unwrap();
        g.add_connection(b, c, MAX_WEIGHT).unwrap();
        g.select_endpoint(a).unwrap();
        g.select_endpoint(c).unwrap();
        let route = g.shortest_path().unwrap();
        assert!(route.is_found());
        assert_eq!(route.path, vec![a, b, c]);
        assert_eq!(route.distance, 2.0 * MAX_WEIGHT);
    }

    #[test]
    fn selecting_unknown_location_is_not_found() {
        let (mut g, ..) = triangle();
        assert_eq!(
            g.select_endpoint(LocationId(77)),
            Err(GraphError::NotFound(NotFoundError(LocationId(77))))
        );
    }

    #[test]
    fn connection_removal_by_id() {
        let (mut g, a, _, c) = triangle();
        let extra = g.add_connection(a, c, 1.0).unwrap();
        assert_eq!(g.materialize_adjacency().weight(a, c), Some(1.0));
        let removed = g.remove_connection(extra).unwrap();
        assert_eq!(removed.weight, 1.0);
        assert_eq!(g.materialize_adjacency().weight(a, c), Some(10.0));
        assert!(g.remove_connection(extra).is_none());
    }

    #[test]
    fn distance_weighted_connection_uses_great_circle() {
        let (mut g, a, b, _) = triangle();
        let id = g.connect_by_distance(a, b).unwrap();
        let conn = g.connections().iter().find(|c| c.id == id).unwrap();
        assert!((conn.weight - 111.195).abs() < 0.01);
        assert_eq!(
            g.connect_by_distance(a, LocationId(50)),
            Err(ValidationError::UnknownLocation(LocationId(50)))
        );
    }

    #[test]
    fn clear_keeps_ids_monotonic() {
        let (mut g, _, _, c) = triangle();
        g.clear();
        assert_eq!(g.location_count(), 0);
        assert!(g.materialize_adjacency().is_empty());
        let fresh = g.add_location("again", Category::Store, 0.0, 0.0).unwrap();
        assert!(fresh > c);
    }
}
