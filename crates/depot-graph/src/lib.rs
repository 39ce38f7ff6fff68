// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Depot network graph.
//!
//! A [`GraphBuilder`] owns the locations (warehouses, stores, junctions)
//! and weighted connections declared in a session. Queries run against an
//! [`AdjacencyView`] snapshot: [`compute_shortest_path`] is a pure,
//! deterministic Dijkstra over that snapshot.
//!
//! ```
//! use depot_graph::{compute_shortest_path, Category, GraphBuilder};
//!
//! let mut g = GraphBuilder::new();
//! let a = g.add_location("A", Category::Warehouse, 0.0, 0.0)?;
//! let b = g.add_location("B", Category::Junction, 0.0, 1.0)?;
//! let c = g.add_location("C", Category::Store, 0.0, 2.0)?;
//! g.add_connection(a, b, 5.0)?;
//! g.add_connection(b, c, 3.0)?;
//! g.add_connection(a, c, 10.0)?;
//!
//! let route = compute_shortest_path(&g.materialize_adjacency(), a, c)?;
//! assert_eq!(route.path, vec![a, b, c]);
//! assert!((route.distance - 8.0).abs() < f64::EPSILON);
//! # Ok::<(), depot_graph::GraphError>(())
//! ```

mod adjacency;
mod builder;
mod error;
mod ident;
mod location;
mod selection;
mod snapshot;
mod solver;

pub use adjacency::{AdjacencyView, Neighbors};
pub use builder::GraphBuilder;
pub use error::{GraphError, NotFoundError, SelectionError, ValidationError};
pub use ident::{ConnectionId, LocationId};
pub use location::{
    great_circle_km, Category, Connection, Location, EARTH_RADIUS_KM, MAX_WEIGHT,
};
pub use selection::{EndpointPolicy, PathSelection, SelectionChange};
pub use snapshot::{ConnectionRecord, Hash32, LocationRecord, NetworkSnapshot};
pub use solver::{compute_shortest_path, ShortestPath};
