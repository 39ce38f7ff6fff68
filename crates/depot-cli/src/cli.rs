// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use depot_graph::{EndpointPolicy, LocationId};

#[derive(Parser, Debug)]
#[command(name = "depot", version)]
#[command(about = "Inspect depot networks and compute shortest routes")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Directory holding saved preferences (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List locations and connections of a network file
    Inspect {
        /// Path to network JSON
        network: PathBuf,
    },
    /// Compute the shortest route between two locations
    Path {
        /// Path to network JSON
        network: PathBuf,
        /// Start location id
        #[arg(long)]
        from: LocationId,
        /// End location id
        #[arg(long)]
        to: LocationId,
        /// Endpoint policy (overrides saved prefs): warehouse-to-store | unrestricted
        #[arg(long)]
        policy: Option<EndpointPolicy>,
        /// Emit the route as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print current preferences
    Show,
    /// Set the default endpoint policy
    SetPolicy {
        /// warehouse-to-store | unrestricted
        policy: EndpointPolicy,
    },
    /// Set the distance unit label
    SetUnit {
        /// Label such as km or mi
        unit: String,
    },
}
