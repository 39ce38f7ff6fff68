// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types for locations and connections.
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Strongly typed identifier for a location in the network.
///
/// Ids are allocated monotonically by [`GraphBuilder`](crate::GraphBuilder)
/// and are never reused within a session, so ordering by id is also
/// ordering by creation. The solver relies on this ordering to break
/// distance ties deterministically.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub u64);

impl LocationId {
    /// Returns the raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocationId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Identifier for a single declared connection.
///
/// Parallel connections between the same pair of locations each get their
/// own id so they can be removed individually.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Monotonic id source shared by both id kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// Hands out the next id, or `None` once the id space is used up.
    ///
    /// `u64::MAX` is never issued; it marks an exhausted allocator.
    pub(crate) fn allocate(&mut self) -> Option<u64> {
        if self.next == u64::MAX {
            return None;
        }
        let id = self.next;
        self.next += 1;
        Some(id)
    }

    /// Ensures the next allocation is strictly greater than `seen`.
    pub(crate) fn bump_past(&mut self, seen: u64) {
        self.next = self.next.max(seen.saturating_add(1));
    }

    /// Keeps whichever allocator is further ahead.
    pub(crate) fn merge(&mut self, other: IdAllocator) {
        self.next = self.next.max(other.next);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;

    #[test]
    fn location_id_parses_trimmed_numbers() {
        assert_eq!(" 42 ".parse::<LocationId>(), Ok(LocationId(42)));
        assert!("loc-1".parse::<LocationId>().is_err());
    }

    #[test]
    fn allocator_never_reissues_after_bump() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocate(), Some(1));
        ids.bump_past(10);
        assert_eq!(ids.allocate(), Some(11));
        ids.bump_past(3);
        assert_eq!(ids.allocate(), Some(12));
    }

    #[test]
    fn allocator_refuses_once_exhausted() {
        let mut ids = IdAllocator::default();
        ids.bump_past(u64::MAX - 2);
        assert_eq!(ids.allocate(), Some(u64::MAX - 1));
        assert_eq!(ids.allocate(), None);
        assert_eq!(ids.allocate(), None);

        let mut ids = IdAllocator::default();
        ids.bump_past(u64::MAX);
        assert_eq!(ids.allocate(), None);
    }
}
