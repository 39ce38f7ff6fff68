// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Table rendering for CLI output.

use comfy_table::Table;
use depot_graph::{AdjacencyView, GraphBuilder, ShortestPath};

pub fn locations_table(g: &GraphBuilder, view: &AdjacencyView) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["id", "name", "category", "lat", "lng", "links"]);
    for loc in g.locations() {
        let links = view.neighbors(loc.id).map_or(0, |n| n.len());
        table.add_row(vec![
            loc.id.to_string(),
            loc.name.clone(),
            loc.category.to_string(),
            format!("{:.4}", loc.latitude),
            format!("{:.4}", loc.longitude),
            links.to_string(),
        ]);
    }
    table
}

pub fn connections_table(g: &GraphBuilder, unit: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["id", "from", "to", "weight"]);
    for conn in g.connections() {
        table.add_row(vec![
            conn.id.to_string(),
            label(g, conn.from),
            label(g, conn.to),
            format!("{:.2} {unit}", conn.weight),
        ]);
    }
    table
}

/// One row per stop with leg and cumulative distance.
pub fn route_table(
    g: &GraphBuilder,
    view: &AdjacencyView,
    route: &ShortestPath,
    unit: &str,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "id", "name", "category", "leg", "total"]);
    let mut total = 0.0;
    let mut prev = None;
    for (i, &id) in route.path.iter().enumerate() {
        let leg = prev.and_then(|p| view.weight(p, id)).unwrap_or(0.0);
        total += leg;
        let (name, category) = g
            .location(id)
            .map_or((String::from("?"), String::from("?")), |l| {
                (l.name.clone(), l.category.to_string())
            });
        table.add_row(vec![
            (i + 1).to_string(),
            id.to_string(),
            name,
            category,
            format!("{leg:.2} {unit}"),
            format!("{total:.2} {unit}"),
        ]);
        prev = Some(id);
    }
    table
}

/// `name (#id)` or just the id if the location is gone.
pub fn label(g: &GraphBuilder, id: depot_graph::LocationId) -> String {
    g.location(id)
        .map_or_else(|| format!("#{id}"), |l| format!("{} (#{id})", l.name))
}
