//! Typed identifiers for stored entities.
//!
//! Raw `i64` keys from the store are wrapped so that a stop id can never be
//! passed where a route id is expected. All ids serialize as their inner
//! integer.

use std::fmt;

use serde::Serialize;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                $name(value)
            }
        }
    };
}

entity_id! {
    /// Identifier of a physical stop.
    StopId
}

entity_id! {
    /// Identifier of the city a stop belongs to.
    CityId
}

entity_id! {
    /// Identifier of a route definition.
    RouteId
}

entity_id! {
    /// Identifier of one position within a route's stop sequence.
    RouteLegId
}

entity_id! {
    /// Identifier of a scheduled run of a vehicle over a route.
    EnrollmentId
}

entity_id! {
    /// Identifier of per-leg timing/cost data attached to an enrollment.
    LegDetailId
}
