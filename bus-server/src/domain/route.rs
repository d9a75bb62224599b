//! Route definition types.
//!
//! A `RouteDefinition` is a named, ordered sequence of stops. Its invariants
//! are enforced at construction, so code holding a route can trust that the
//! leg sequence is usable for search.

use std::collections::HashSet;
use std::sync::Arc;

use super::{DomainError, RouteId, RouteLegId, Stop};

/// One stop within a route's ordered sequence.
#[derive(Debug, Clone)]
pub struct RouteLeg {
    pub id: RouteLegId,
    pub stop: Arc<Stop>,
    /// Position value within the route. Strictly increasing along the
    /// sequence; not necessarily contiguous.
    pub order: u32,
}

/// A named, ordered sequence of stops a vehicle follows.
///
/// # Invariants
///
/// - At least 2 legs
/// - Leg `order` values strictly increasing (hence unique)
/// - A given stop appears at most once
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    pub id: RouteId,
    /// Free-form type tag (e.g. "express", "night").
    pub kind: String,
    legs: Vec<RouteLeg>,
}

impl RouteDefinition {
    /// Constructs a route, validating the leg sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are fewer than 2 legs, if leg orders are not
    /// strictly increasing, or if a stop appears more than once.
    pub fn new(id: RouteId, kind: String, legs: Vec<RouteLeg>) -> Result<Self, DomainError> {
        if legs.len() < 2 {
            return Err(DomainError::RouteTooShort);
        }

        for window in legs.windows(2) {
            if window[1].order <= window[0].order {
                return Err(DomainError::LegOrderNotIncreasing);
            }
        }

        let mut seen = HashSet::new();
        for leg in &legs {
            if !seen.insert(leg.stop.id) {
                return Err(DomainError::DuplicateStop(leg.stop.id));
            }
        }

        Ok(Self { id, kind, legs })
    }

    /// Returns the legs in sequence order.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Returns the position of the last leg.
    pub fn last_position(&self) -> usize {
        // Safe: validated non-empty at construction
        self.legs.len() - 1
    }

    /// Finds the position of the first leg whose stop satisfies `matches`.
    ///
    /// Legs are scanned in sequence order; with the at-most-once stop
    /// invariant this is the only occurrence when matching by stop id.
    pub fn position_matching(&self, matches: impl Fn(&Stop) -> bool) -> Option<usize> {
        self.legs.iter().position(|leg| matches(&leg.stop))
    }
}
