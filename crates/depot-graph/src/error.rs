// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for graph mutation, selection, and path queries.
//!
//! Every failing call leaves the [`GraphBuilder`](crate::GraphBuilder)
//! exactly as it was. "No path" is not an error; see
//! [`ShortestPath::is_found`](crate::ShortestPath::is_found).
use thiserror::Error;

use crate::ident::LocationId;
use crate::location::Category;

/// Rejected input to a builder mutation or import.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Location name was empty or whitespace.
    #[error("location name must not be empty")]
    EmptyName,
    /// Latitude outside `[-90, 90]` (or NaN).
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude outside `[-180, 180]` (or NaN).
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    /// Category label not recognised.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// Both endpoints of a connection are the same location.
    #[error("cannot connect location {0} to itself")]
    SelfLoop(LocationId),
    /// A connection endpoint does not exist.
    #[error("unknown location: {0}")]
    UnknownLocation(LocationId),
    /// Weight was negative, NaN, or above [`MAX_WEIGHT`](crate::MAX_WEIGHT).
    #[error("connection weight must be in [0, {max}], got {0}", max = crate::MAX_WEIGHT)]
    Weight(f64),
    /// An imported snapshot declared the same location id twice.
    #[error("duplicate location id: {0}")]
    DuplicateLocation(LocationId),
    /// No fresh id is left; imported ids reached the top of the id space.
    #[error("no {0} ids left to allocate")]
    IdsExhausted(&'static str),
}

/// A query referenced a location that is not in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("location not found: {0}")]
pub struct NotFoundError(pub LocationId);

/// Endpoint selection refused by the active policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The start endpoint must have a different category.
    #[error("location {id} is a {actual}; a route must start at a {required}")]
    StartCategory {
        /// Location that was offered as start.
        id: LocationId,
        /// Its category.
        actual: Category,
        /// Category the policy requires.
        required: Category,
    },
    /// The end endpoint must have a different category.
    #[error("location {id} is a {actual}; a route must end at a {required}")]
    EndCategory {
        /// Location that was offered as end.
        id: LocationId,
        /// Its category.
        actual: Category,
        /// Category the policy requires.
        required: Category,
    },
    /// Both endpoints are already chosen and `id` is neither of them.
    #[error("both endpoints are already selected; deselect one before choosing {0}")]
    Full(LocationId),
}

/// Umbrella error for builder-level operations that combine concerns.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Unknown location id.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Endpoint selection refused.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// A route was requested before both endpoints were selected.
    #[error("select both a start and an end location first")]
    IncompleteSelection,
}
