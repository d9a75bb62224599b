//! Domain types for the bus itinerary search engine.
//!
//! These types represent validated schedule data. Invariants are enforced
//! at construction time, so code that receives them can trust their
//! validity.

mod enrollment;
mod error;
mod ids;
mod route;
mod stop;

pub use enrollment::{Enrollment, LegDetail, Vehicle};
pub use error::DomainError;
pub use ids::{CityId, EnrollmentId, LegDetailId, RouteId, RouteLegId, StopId};
pub use route::{RouteDefinition, RouteLeg};
pub use stop::{City, Stop};
