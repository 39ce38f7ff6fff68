// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved preferences shared by Depot front ends.

use depot_graph::EndpointPolicy;
use serde::{Deserialize, Serialize};

/// Config key under which [`DepotPrefs`] are stored.
pub const PREFS_KEY: &str = "depot_prefs";

/// Saved preferences for a Depot session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepotPrefs {
    /// Which categories may start/end an interactive route.
    pub endpoint_policy: EndpointPolicy,
    /// Unit label shown next to connection weights and route totals.
    pub distance_unit: String,
}

impl Default for DepotPrefs {
    fn default() -> Self {
        Self {
            endpoint_policy: EndpointPolicy::default(),
            distance_unit: "km".to_owned(),
        }
    }
}
