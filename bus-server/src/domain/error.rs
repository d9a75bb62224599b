//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from store/IO errors.

use super::{RouteLegId, StopId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A route needs at least two legs to carry passengers anywhere.
    #[error("route must have at least 2 legs")]
    RouteTooShort,

    /// Leg order values must be strictly increasing along the sequence.
    #[error("route leg orders must be strictly increasing")]
    LegOrderNotIncreasing,

    /// A stop may appear at most once per route.
    #[error("stop {0} appears more than once on the route")]
    DuplicateStop(StopId),

    /// An enrollment carries a leg detail for a leg its route doesn't have.
    #[error("leg detail references unknown route leg {0}")]
    UnknownRouteLeg(RouteLegId),

    /// An enrollment carries two leg details for the same route leg.
    #[error("duplicate leg detail for route leg {0}")]
    DuplicateLegDetail(RouteLegId),

    /// An enrollment is missing the leg detail for a route leg.
    #[error("missing leg detail for route leg {0}")]
    MissingLegDetail(RouteLegId),

    /// Travel and wait durations must be non-negative.
    #[error("negative duration on leg detail for route leg {0}")]
    NegativeDuration(RouteLegId),

    /// Invalid trip segment construction (e.g. alight before board).
    #[error("invalid segment: {0}")]
    InvalidSegment(&'static str),
}
