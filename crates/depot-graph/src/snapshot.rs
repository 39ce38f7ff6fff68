// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Declared-network interchange format (bulk import/export) with
//! deterministic hashing.
use std::collections::BTreeSet;

use ciborium::ser::into_writer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::GraphBuilder;
use crate::error::ValidationError;
use crate::ident::LocationId;
use crate::location::{validate_location, Category, Connection, Location};

/// Blake3 digest of a canonical snapshot (32 bytes).
pub type Hash32 = [u8; 32];

/// One declared location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Caller-chosen id; must be unique within the snapshot.
    pub id: LocationId,
    /// Display label.
    pub name: String,
    /// Network role. Unknown labels become [`Category::Other`].
    pub category: Category,
    /// Degrees north.
    #[serde(alias = "latitude")]
    pub lat: f64,
    /// Degrees east.
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

/// One declared connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// First endpoint.
    pub from: LocationId,
    /// Second endpoint.
    pub to: LocationId,
    /// Route distance. When absent, the great-circle distance in km is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// A whole declared network: locations plus connections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Declared locations.
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
    /// Declared connections.
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl NetworkSnapshot {
    /// Canonical serialization for hashing/comparison: locations by id,
    /// connections as `(min, max, weight)` in ascending order.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, ciborium::ser::Error<std::io::Error>> {
        let mut s = self.clone();
        s.locations.sort_by_key(|l| l.id);
        // Connections are undirected: store each with its endpoints ascending.
        for c in &mut s.connections {
            if c.to < c.from {
                std::mem::swap(&mut c.from, &mut c.to);
            }
        }
        s.connections.sort_by(|a, b| {
            (a.from, a.to)
                .cmp(&(b.from, b.to))
                .then_with(|| a.weight.unwrap_or(-1.0).total_cmp(&b.weight.unwrap_or(-1.0)))
        });
        let mut bytes = Vec::new();
        into_writer(&s, &mut bytes)?;
        Ok(bytes)
    }

    /// Compute blake3 hash of the canonical form.
    pub fn compute_hash(&self) -> Result<Hash32, ciborium::ser::Error<std::io::Error>> {
        Ok(blake3::hash(&self.to_canonical_bytes()?).into())
    }
}

impl GraphBuilder {
    /// Builds a fresh builder from a declared network.
    ///
    /// Either every record is accepted or an error is returned; nothing is
    /// partially applied. New ids continue after the highest imported id.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Self, ValidationError> {
        let mut g = GraphBuilder::new();
        let mut seen = BTreeSet::new();
        for rec in &snapshot.locations {
            if !seen.insert(rec.id) {
                return Err(ValidationError::DuplicateLocation(rec.id));
            }
            let name = validate_location(&rec.name, rec.lat, rec.lng)?;
            g.location_ids.bump_past(rec.id.0);
            g.locations.insert(
                rec.id,
                Location {
                    id: rec.id,
                    name,
                    category: rec.category,
                    latitude: rec.lat,
                    longitude: rec.lng,
                },
            );
        }
        for rec in &snapshot.connections {
            match rec.weight {
                Some(w) => g.add_connection(rec.from, rec.to, w)?,
                None => g.connect_by_distance(rec.from, rec.to)?,
            };
        }
        debug!(
            locations = g.locations.len(),
            connections = g.connections.len(),
            "imported network"
        );
        Ok(g)
    }

    /// Replaces the whole network with `snapshot`, keeping the endpoint
    /// policy. On error the current network is left as it was.
    pub fn load_snapshot(&mut self, snapshot: &NetworkSnapshot) -> Result<(), ValidationError> {
        let mut next = Self::from_snapshot(snapshot)?;
        next.policy = self.policy;
        next.location_ids.merge(self.location_ids);
        next.connection_ids.merge(self.connection_ids);
        *self = next;
        Ok(())
    }

    /// Exports the network with explicit weights.
    #[must_use]
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            locations: self.locations().map(LocationRecord::from).collect(),
            connections: self.connections().iter().map(ConnectionRecord::from).collect(),
        }
    }
}

impl From<&Location> for LocationRecord {
    fn from(loc: &Location) -> Self {
        Self {
            id: loc.id,
            name: loc.name.clone(),
            category: loc.category,
            lat: loc.latitude,
            lng: loc.longitude,
        }
    }
}

impl From<&Connection> for ConnectionRecord {
    fn from(conn: &Connection) -> Self {
        Self {
            from: conn.from,
            to: conn.to,
            weight: Some(conn.weight),
        }
    }
}
