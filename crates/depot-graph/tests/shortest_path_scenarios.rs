// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
//! End-to-end route scenarios over a builder-owned network.

use depot_graph::{
    compute_shortest_path, Category, EndpointPolicy, GraphBuilder, GraphError, LocationId,
    NetworkSnapshot, NotFoundError, SelectionChange, SelectionError, ShortestPath,
};

struct Triangle {
    g: GraphBuilder,
    a: LocationId,
    b: LocationId,
    c: LocationId,
}

fn triangle() -> Triangle {
    let mut g = GraphBuilder::new();
    let a = g
        .add_location("A", Category::Warehouse, 0.0, 0.0)
        .expect("add A");
    let b = g
        .add_location("B", Category::Junction, 0.0, 1.0)
        .expect("add B");
    let c = g
        .add_location("C", Category::Store, 0.0, 2.0)
        .expect("add C");
    g.add_connection(a, b, 5.0).expect("A-B");
    g.add_connection(b, c, 3.0).expect("B-C");
    g.add_connection(a, c, 10.0).expect("A-C");
    Triangle { g, a, b, c }
}

#[test]
fn junction_detour_is_shorter_than_direct_route() {
    let t = triangle();
    let route = compute_shortest_path(&t.g.materialize_adjacency(), t.a, t.c).expect("route");
    assert_eq!(route.path, vec![t.a, t.b, t.c]);
    assert!((route.distance - 8.0).abs() < f64::EPSILON);
}

#[test]
fn removing_the_junction_falls_back_to_direct_route() {
    let mut t = triangle();
    t.g.remove_location(t.b);
    assert_eq!(t.g.connections().len(), 1);
    let route = compute_shortest_path(&t.g.materialize_adjacency(), t.a, t.c).expect("route");
    assert_eq!(route.path, vec![t.a, t.c]);
    assert!((route.distance - 10.0).abs() < f64::EPSILON);
}

#[test]
fn separate_components_have_no_route() {
    let mut t = triangle();
    let island = t
        .g
        .add_location("Island", Category::Store, 10.0, 10.0)
        .expect("add island");
    let pier = t
        .g
        .add_location("Pier", Category::Junction, 10.0, 10.5)
        .expect("add pier");
    t.g.add_connection(island, pier, 2.0).expect("island-pier");

    let route = compute_shortest_path(&t.g.materialize_adjacency(), t.a, island).expect("query");
    assert_eq!(route, ShortestPath::unreachable());
    assert!(route.path.is_empty());
    assert!(route.distance.is_infinite());
}

#[test]
fn removed_location_is_not_found_by_the_solver() {
    let mut t = triangle();
    t.g.remove_location(t.c);
    assert_eq!(
        compute_shortest_path(&t.g.materialize_adjacency(), t.a, t.c),
        Err(NotFoundError(t.c))
    );
}

#[test]
fn parallel_routes_use_the_cheapest() {
    let mut t = triangle();
    t.g.add_connection(t.c, t.a, 4.0).expect("cheaper A-C");
    t.g.add_connection(t.a, t.c, 6.0).expect("dearer A-C");
    let route = compute_shortest_path(&t.g.materialize_adjacency(), t.a, t.c).expect("route");
    assert_eq!(route.path, vec![t.a, t.c]);
    assert!((route.distance - 4.0).abs() < f64::EPSILON);
}

#[test]
fn interactive_selection_drives_route_query() {
    let mut t = triangle();
    assert_eq!(t.g.shortest_path(), Err(GraphError::IncompleteSelection));

    // Policy: a route starts at a warehouse and ends at a store.
    assert!(matches!(
        t.g.select_endpoint(t.b),
        Err(GraphError::Selection(SelectionError::StartCategory { .. }))
    ));
    assert_eq!(
        t.g.select_endpoint(t.a),
        Ok(SelectionChange::StartSelected(t.a))
    );
    assert_eq!(
        t.g.select_endpoint(t.c),
        Ok(SelectionChange::EndSelected(t.c))
    );

    let route = t.g.shortest_path().expect("route");
    assert_eq!(route.path, vec![t.a, t.b, t.c]);

    assert_eq!(t.g.select_endpoint(t.c), Ok(SelectionChange::Cleared(t.c)));
    assert_eq!(t.g.shortest_path(), Err(GraphError::IncompleteSelection));
}

#[test]
fn unrestricted_policy_allows_any_endpoints() {
    let mut t = triangle();
    t.g.set_policy(EndpointPolicy::Unrestricted);
    t.g.select_endpoint(t.c).expect("store as start");
    t.g.select_endpoint(t.b).expect("junction as end");
    let route = t.g.shortest_path().expect("route");
    assert_eq!(route.path, vec![t.c, t.b]);
    assert!((route.distance - 3.0).abs() < f64::EPSILON);
}

#[test]
fn solver_ignores_endpoint_policy() {
    let t = triangle();
    // Store to warehouse is not selectable interactively, but the solver
    // answers any pair.
    let route = compute_shortest_path(&t.g.materialize_adjacency(), t.c, t.a).expect("route");
    assert_eq!(route.path, vec![t.c, t.b, t.a]);
}

#[test]
fn demo_network_routes_warehouse_to_store() {
    let snapshot: NetworkSnapshot =
        serde_json::from_str(include_str!("../../../demos/kolkata.json")).expect("demo json");
    let mut g = GraphBuilder::from_snapshot(&snapshot).expect("demo network");
    let (ruby_park, salt_lake, kestopur) = (LocationId(1), LocationId(20), LocationId(22));

    g.select_endpoint(ruby_park).expect("warehouse start");
    g.select_endpoint(kestopur).expect("store end");
    let route = g.shortest_path().expect("route");
    assert_eq!(route.path.first(), Some(&ruby_park));
    assert_eq!(route.path.last(), Some(&kestopur));

    // The declared 1.2 km link undercuts the great-circle estimate.
    let view = g.materialize_adjacency();
    assert_eq!(view.weight(salt_lake, kestopur), Some(1.2));
    let summed: f64 = route
        .path
        .windows(2)
        .map(|w| view.weight(w[0], w[1]).expect("adjacent hops"))
        .sum();
    assert!((summed - route.distance).abs() < 1e-9);
}
