// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Route endpoint selection state and the category policy applied to it.
//!
//! The solver itself accepts any pair of locations; the policy here only
//! governs what a caller may pick interactively.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::ident::LocationId;
use crate::location::Category;

/// Which categories may serve as route endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointPolicy {
    /// Start must be a warehouse and end must be a store.
    #[default]
    WarehouseToStore,
    /// Any location may be either endpoint.
    Unrestricted,
}

impl EndpointPolicy {
    /// Category required for the start endpoint, if any.
    #[must_use]
    pub fn required_start(self) -> Option<Category> {
        match self {
            Self::WarehouseToStore => Some(Category::Warehouse),
            Self::Unrestricted => None,
        }
    }

    /// Category required for the end endpoint, if any.
    #[must_use]
    pub fn required_end(self) -> Option<Category> {
        match self {
            Self::WarehouseToStore => Some(Category::Store),
            Self::Unrestricted => None,
        }
    }
}

impl fmt::Display for EndpointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WarehouseToStore => "warehouse-to-store",
            Self::Unrestricted => "unrestricted",
        })
    }
}

impl FromStr for EndpointPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "warehouse-to-store" => Ok(Self::WarehouseToStore),
            "unrestricted" => Ok(Self::Unrestricted),
            other => Err(format!(
                "unknown endpoint policy `{other}` (expected warehouse-to-store or unrestricted)"
            )),
        }
    }
}

/// What a successful [`PathSelection::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// `id` became the start endpoint.
    StartSelected(LocationId),
    /// `id` became the end endpoint.
    EndSelected(LocationId),
    /// `id` was already selected and has been deselected.
    Cleared(LocationId),
}

/// Zero, one, or two selected endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathSelection {
    start: Option<LocationId>,
    end: Option<LocationId>,
}

impl PathSelection {
    /// Selected start, if any.
    #[must_use]
    pub fn start(&self) -> Option<LocationId> {
        self.start
    }

    /// Selected end, if any.
    #[must_use]
    pub fn end(&self) -> Option<LocationId> {
        self.end
    }

    /// Both endpoints when the selection is complete.
    #[must_use]
    pub fn endpoints(&self) -> Option<(LocationId, LocationId)> {
        self.start.zip(self.end)
    }

    /// Returns `true` if `id` is either endpoint.
    #[must_use]
    pub fn contains(&self, id: LocationId) -> bool {
        self.start == Some(id) || self.end == Some(id)
    }

    /// Selects or deselects `id` (whose category is `category`).
    ///
    /// Fills the start first, then the end. Offering an already selected
    /// id clears it. Offering a third id while both are set is refused.
    /// A refused call leaves the selection unchanged.
    pub fn toggle(
        &mut self,
        id: LocationId,
        category: Category,
        policy: EndpointPolicy,
    ) -> Result<SelectionChange, SelectionError> {
        match (self.start, self.end) {
            (None, _) if self.end != Some(id) => {
                if let Some(required) = policy.required_start() {
                    if category != required {
                        return Err(SelectionError::StartCategory {
                            id,
                            actual: category,
                            required,
                        });
                    }
                }
                self.start = Some(id);
                Ok(SelectionChange::StartSelected(id))
            }
            (Some(start), None) if start != id => {
                if let Some(required) = policy.required_end() {
                    if category != required {
                        return Err(SelectionError::EndCategory {
                            id,
                            actual: category,
                            required,
                        });
                    }
                }
                self.end = Some(id);
                Ok(SelectionChange::EndSelected(id))
            }
            _ if self.contains(id) => {
                self.forget(id);
                Ok(SelectionChange::Cleared(id))
            }
            _ => Err(SelectionError::Full(id)),
        }
    }

    /// Drops `id` from whichever endpoint holds it. Returns `true` if it did.
    pub fn forget(&mut self, id: LocationId) -> bool {
        let before = *self;
        if self.start == Some(id) {
            self.start = None;
        }
        if self.end == Some(id) {
            self.end = None;
        }
        *self != before
    }

    /// Clears both endpoints.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
