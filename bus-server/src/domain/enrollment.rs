//! Enrollment types.
//!
//! An `Enrollment` is one scheduled run of a vehicle over a route. The same
//! route can be timed and priced differently across enrollments: each
//! enrollment carries its own `LegDetail` per route leg, looked up by
//! `RouteLegId`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{DomainError, EnrollmentId, LegDetailId, RouteDefinition, RouteLegId};

/// Display data for the vehicle operating an enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    /// Vehicle type (e.g. "coach", "minibus").
    pub kind: String,
    /// Plate or fleet number.
    pub number: String,
    /// Operating company name.
    pub company: String,
}

/// Per-leg timing and cost attached to one enrollment.
///
/// `travel` and `cost_to_next` describe the hop from this stop to the next
/// one; `wait` is the dwell at this stop before departing. The last leg's
/// detail is terminal: its "to next" fields are never consumed.
#[derive(Debug, Clone)]
pub struct LegDetail {
    pub id: LegDetailId,
    pub route_leg: RouteLegId,
    /// Travel duration to the next stop.
    pub travel: Duration,
    /// Wait duration at this stop before departure.
    pub wait: Duration,
    /// Monetary cost of travelling to the next stop.
    pub cost_to_next: f64,
}

/// One scheduled, dated run of a vehicle over a route.
///
/// Read-only to the search engine. The departure timestamp is the absolute
/// UTC instant the vehicle reaches the route's first stop; all other times
/// are reconstructed from it by walking the leg details.
///
/// # Invariants
///
/// - At most one `LegDetail` per route leg, and none for legs the route
///   doesn't have. Completeness is not required here: a leg with no detail
///   surfaces as a `DomainError` when a trip segment over it is built.
/// - Travel and wait durations are non-negative
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub vehicle: Vehicle,
    pub route: Arc<RouteDefinition>,
    /// Anchor departure, at the first leg of the route (UTC).
    pub departure: DateTime<Utc>,
    /// Whether this run was cancelled by operations.
    pub cancelled: bool,
    details: HashMap<RouteLegId, LegDetail>,
}

impl Enrollment {
    /// Constructs an enrollment, validating its leg details against the route.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a detail references a leg the route doesn't have,
    /// if two details target the same leg, or if a travel/wait duration is
    /// negative.
    pub fn new(
        id: EnrollmentId,
        vehicle: Vehicle,
        route: Arc<RouteDefinition>,
        departure: DateTime<Utc>,
        details: Vec<LegDetail>,
        cancelled: bool,
    ) -> Result<Self, DomainError> {
        let mut by_leg = HashMap::with_capacity(details.len());

        for detail in details {
            if detail.travel < Duration::zero() || detail.wait < Duration::zero() {
                return Err(DomainError::NegativeDuration(detail.route_leg));
            }
            if !route.legs().iter().any(|leg| leg.id == detail.route_leg) {
                return Err(DomainError::UnknownRouteLeg(detail.route_leg));
            }
            let leg_id = detail.route_leg;
            if by_leg.insert(leg_id, detail).is_some() {
                return Err(DomainError::DuplicateLegDetail(leg_id));
            }
        }

        Ok(Self {
            id,
            vehicle,
            route,
            departure,
            cancelled,
            details: by_leg,
        })
    }

    /// Returns the timing/cost detail for a route leg.
    pub fn detail_for(&self, leg: RouteLegId) -> Option<&LegDetail> {
        self.details.get(&leg)
    }
}
