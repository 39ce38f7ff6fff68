// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Location and connection records.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ident::{ConnectionId, LocationId};

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Largest accepted connection weight.
///
/// Any path sums at most `u64::MAX` of these, which stays far below
/// `f64::MAX`, so route totals never overflow to infinity.
pub const MAX_WEIGHT: f64 = 1.0e15;

/// Role of a location in the network.
///
/// Renderers pick marker styling from this; endpoint policies use it to
/// restrict which locations may start or end a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Origin of deliveries.
    Warehouse,
    /// Delivery destination.
    Store,
    /// Intermediate waypoint.
    Junction,
    /// Anything else; unknown categories in imported data land here.
    #[serde(other)]
    Other,
}

impl Category {
    /// Lowercase label used in files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::Store => "store",
            Self::Junction => "junction",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warehouse" => Ok(Self::Warehouse),
            "store" => Ok(Self::Store),
            "junction" => Ok(Self::Junction),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::UnknownCategory(s.to_owned())),
        }
    }
}

/// One network vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier assigned at creation.
    pub id: LocationId,
    /// Display label (never empty).
    pub name: String,
    /// Network role.
    pub category: Category,
    /// Degrees north, in `[-90, 90]`.
    pub latitude: f64,
    /// Degrees east, in `[-180, 180]`.
    pub longitude: f64,
}

impl Location {
    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Location) -> f64 {
        great_circle_km(
            (self.latitude, self.longitude),
            (other.latitude, other.longitude),
        )
    }
}

/// One undirected weighted edge between two distinct locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Connection identifier.
    pub id: ConnectionId,
    /// First endpoint.
    pub from: LocationId,
    /// Second endpoint.
    pub to: LocationId,
    /// Route distance; finite and non-negative.
    pub weight: f64,
}

impl Connection {
    /// Returns `true` if either endpoint is `id`.
    #[must_use]
    pub fn touches(&self, id: LocationId) -> bool {
        self.from == id || self.to == id
    }
}

/// Checks a name/coordinate triple and returns the trimmed name.
pub(crate) fn validate_location(
    name: &str,
    latitude: f64,
    longitude: f64,
) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    // `contains` is false for NaN, so NaN is rejected here too.
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::Latitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::Longitude(longitude));
    }
    Ok(name.to_owned())
}

/// Checks that `weight` is usable as an edge weight.
pub(crate) fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if (0.0..=MAX_WEIGHT).contains(&weight) {
        Ok(())
    } else {
        Err(ValidationError::Weight(weight))
    }
}

/// Haversine distance in kilometres between two `(lat, lng)` points in degrees.
#[must_use]
pub fn great_circle_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lng1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lng2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Warehouse".parse::<Category>(), Ok(Category::Warehouse));
        assert_eq!(" store".parse::<Category>(), Ok(Category::Store));
        assert!(matches!(
            "depot".parse::<Category>(),
            Err(ValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn unknown_category_deserializes_as_other() {
        let cat: Category = serde_json::from_str("\"hub\"").unwrap();
        assert_eq!(cat, Category::Other);
        let cat: Category = serde_json::from_str("\"junction\"").unwrap();
        assert_eq!(cat, Category::Junction);
    }

    #[test]
    fn coordinate_bounds_are_inclusive() {
        assert!(validate_location("pole", 90.0, 180.0).is_ok());
        assert!(validate_location("pole", -90.0, -180.0).is_ok());
        assert_eq!(
            validate_location("x", 90.5, 0.0),
            Err(ValidationError::Latitude(90.5))
        );
        assert_eq!(
            validate_location("x", 0.0, -180.25),
            Err(ValidationError::Longitude(-180.25))
        );
        assert!(validate_location("x", f64::NAN, 0.0).is_err());
    }

    #[test]
    fn blank_names_are_rejected_and_names_trimmed() {
        assert_eq!(
            validate_location("   ", 0.0, 0.0),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            validate_location("  Dankuni ", 0.0, 0.0).unwrap(),
            "Dankuni"
        );
    }

    #[test]
    fn weights_must_be_non_negative_and_capped() {
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(12.5).is_ok());
        assert!(validate_weight(-0.1).is_err());
        assert!(validate_weight(MAX_WEIGHT).is_ok());
        assert!(validate_weight(MAX_WEIGHT * 2.0).is_err());
        assert!(validate_weight(f64::MAX).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
        assert!(validate_weight(f64::NAN).is_err());
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = great_circle_km((0.0, 0.0), (0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
        assert!(great_circle_km((22.5, 88.3), (22.5, 88.3)).abs() < 1e-9);
    }
}
