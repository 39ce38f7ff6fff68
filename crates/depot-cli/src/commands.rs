// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command implementations. All output goes through the supplied writer.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use depot_app_core::config::ConfigService;
use depot_app_core::prefs::{DepotPrefs, PREFS_KEY};
use depot_config_fs::FsConfigStore;
use depot_graph::{compute_shortest_path, GraphBuilder, NetworkSnapshot};
use serde_json::json;
use tracing::{info, warn};

use crate::cli::{Cli, Command, PrefsAction};
use crate::render;

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Command::Inspect { network } => {
            let prefs = load_prefs(config_dir);
            inspect(&network, &prefs, out)
        }
        Command::Path {
            network,
            from,
            to,
            policy,
            json,
        } => {
            let prefs = load_prefs(config_dir);
            let mut g = load_network(&network)?;
            g.set_policy(policy.unwrap_or(prefs.endpoint_policy));
            route(&mut g, from, to, &prefs, json, out)
        }
        Command::Prefs { action } => prefs_command(config_dir, action, out),
    }
}

fn open_config(dir: Option<&Path>) -> Result<ConfigService<FsConfigStore>> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    }
    .context("failed to open config store")?;
    Ok(ConfigService::new(store))
}

/// Saved prefs, or defaults when the store is unavailable or unreadable.
fn load_prefs(dir: Option<&Path>) -> DepotPrefs {
    let loaded = open_config(dir).and_then(|svc| {
        svc.load_or_default::<DepotPrefs>(PREFS_KEY)
            .context("failed to read prefs")
    });
    match loaded {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!("using default prefs: {err:#}");
            DepotPrefs::default()
        }
    }
}

fn load_network(path: &Path) -> Result<GraphBuilder> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot: NetworkSnapshot = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let g = GraphBuilder::from_snapshot(&snapshot)
        .with_context(|| format!("invalid network in {}", path.display()))?;
    info!(
        locations = g.location_count(),
        connections = g.connections().len(),
        "loaded {}",
        path.display()
    );
    Ok(g)
}

fn inspect(path: &Path, prefs: &DepotPrefs, out: &mut impl Write) -> Result<()> {
    let g = load_network(path)?;
    let view = g.materialize_adjacency();
    let hash = g
        .snapshot()
        .compute_hash()
        .context("failed to hash network")?;
    writeln!(out, "{}", render::locations_table(&g, &view))?;
    writeln!(
        out,
        "{}",
        render::connections_table(&g, &prefs.distance_unit)
    )?;
    writeln!(
        out,
        "{} locations, {} connections ({} distinct links)",
        g.location_count(),
        g.connections().len(),
        view.edge_count()
    )?;
    writeln!(out, "hash: {}", hex::encode(hash))?;
    Ok(())
}

fn route(
    g: &mut GraphBuilder,
    from: depot_graph::LocationId,
    to: depot_graph::LocationId,
    prefs: &DepotPrefs,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let policy = g.policy();
    g.select_endpoint(from)
        .with_context(|| format!("cannot start at {from} under policy {policy}"))?;
    let route = if from == to {
        compute_shortest_path(&g.materialize_adjacency(), from, to)?
    } else {
        g.select_endpoint(to)
            .with_context(|| format!("cannot end at {to} under policy {policy}"))?;
        g.shortest_path()?
    };
    let view = g.materialize_adjacency();
    let unit = &prefs.distance_unit;

    if as_json {
        let body = json!({
            "from": from,
            "to": to,
            "found": route.is_found(),
            "path": route.path,
            "distance": route.is_found().then_some(route.distance),
            "unit": unit,
        });
        serde_json::to_writer_pretty(&mut *out, &body)?;
        writeln!(out)?;
        return Ok(());
    }

    if !route.is_found() {
        writeln!(
            out,
            "no path from {} to {}",
            render::label(g, from),
            render::label(g, to)
        )?;
        return Ok(());
    }
    writeln!(out, "{}", render::route_table(g, &view, &route, unit))?;
    writeln!(
        out,
        "shortest route {} -> {}: {:.2} {unit} over {} hop(s)",
        render::label(g, from),
        render::label(g, to),
        route.distance,
        route.hops()
    )?;
    Ok(())
}

fn prefs_command(dir: Option<&Path>, action: PrefsAction, out: &mut impl Write) -> Result<()> {
    let svc = open_config(dir)?;
    let mut prefs: DepotPrefs = svc
        .load_or_default(PREFS_KEY)
        .context("failed to read prefs")?;
    match action {
        PrefsAction::Show => {}
        PrefsAction::SetPolicy { policy } => {
            prefs.endpoint_policy = policy;
            svc.save(PREFS_KEY, &prefs).context("failed to save prefs")?;
        }
        PrefsAction::SetUnit { unit } => {
            prefs.distance_unit = unit;
            svc.save(PREFS_KEY, &prefs).context("failed to save prefs")?;
        }
    }
    writeln!(out, "endpoint_policy = {}", prefs.endpoint_policy)?;
    writeln!(out, "distance_unit = {}", prefs.distance_unit)?;
    writeln!(out, "config_dir = {}", svc.store().base().display())?;
    Ok(())
}
