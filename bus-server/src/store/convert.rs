//! Conversion from wire network documents to the domain model.
//!
//! Resolves raw id references into shared `Arc` values and validates the
//! result. Everything the engine later relies on (leg ordering, detail
//! completeness, non-negative durations) is checked here, at the boundary,
//! so malformed documents are rejected with a pinpointed error instead of
//! surfacing mid-search.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;

use crate::domain::{
    City, CityId, DomainError, Enrollment, EnrollmentId, LegDetail, LegDetailId, RouteDefinition,
    RouteId, RouteLeg, RouteLegId, Stop, StopId, Vehicle,
};

use super::types::{EnrollmentRecord, NetworkDoc, RouteRecord, StopRecord};

/// Error converting a network document to domain types.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("duplicate stop id {0}")]
    DuplicateStop(i64),

    #[error("duplicate route id {0}")]
    DuplicateRoute(i64),

    #[error("route {route} references unknown stop {stop}")]
    UnknownStop { route: i64, stop: i64 },

    #[error("enrollment {enrollment} references unknown route {route}")]
    UnknownRoute { enrollment: i64, route: i64 },

    #[error("enrollment {enrollment} has a negative duration on leg detail {detail}")]
    NegativeDuration { enrollment: i64, detail: i64 },

    #[error("enrollment {enrollment} is missing a leg detail for route leg {leg}")]
    MissingLegDetail { enrollment: i64, leg: i64 },

    #[error("invalid route {route}: {source}")]
    InvalidRoute {
        route: i64,
        #[source]
        source: DomainError,
    },

    #[error("invalid enrollment {enrollment}: {source}")]
    InvalidEnrollment {
        enrollment: i64,
        #[source]
        source: DomainError,
    },
}

/// Convert a whole network document into search-ready enrollments.
pub fn convert_network(doc: NetworkDoc) -> Result<Vec<Arc<Enrollment>>, ConversionError> {
    let stops = convert_stops(&doc.stops)?;
    let routes = convert_routes(&doc.routes, &stops)?;

    doc.enrollments
        .iter()
        .map(|record| convert_enrollment(record, &routes))
        .collect()
}

fn convert_stops(records: &[StopRecord]) -> Result<HashMap<i64, Arc<Stop>>, ConversionError> {
    let mut stops = HashMap::with_capacity(records.len());

    for record in records {
        let stop = Arc::new(Stop {
            id: StopId(record.id),
            name: record.name.clone(),
            city: City {
                id: CityId(record.city.id),
                name: record.city.name.clone(),
                region: record.city.region.clone(),
                country: record.city.country.clone(),
            },
            latitude: record.latitude,
            longitude: record.longitude,
        });

        if stops.insert(record.id, stop).is_some() {
            return Err(ConversionError::DuplicateStop(record.id));
        }
    }

    Ok(stops)
}

fn convert_routes(
    records: &[RouteRecord],
    stops: &HashMap<i64, Arc<Stop>>,
) -> Result<HashMap<i64, Arc<RouteDefinition>>, ConversionError> {
    let mut routes = HashMap::with_capacity(records.len());

    for record in records {
        let mut legs = Vec::with_capacity(record.legs.len());
        for leg in &record.legs {
            let stop = stops
                .get(&leg.stop_id)
                .ok_or(ConversionError::UnknownStop {
                    route: record.id,
                    stop: leg.stop_id,
                })?;
            legs.push(RouteLeg {
                id: RouteLegId(leg.id),
                stop: stop.clone(),
                order: leg.order,
            });
        }
        legs.sort_by_key(|leg| leg.order);

        let route = RouteDefinition::new(RouteId(record.id), record.kind.clone(), legs).map_err(
            |source| ConversionError::InvalidRoute {
                route: record.id,
                source,
            },
        )?;

        if routes.insert(record.id, Arc::new(route)).is_some() {
            return Err(ConversionError::DuplicateRoute(record.id));
        }
    }

    Ok(routes)
}

fn convert_enrollment(
    record: &EnrollmentRecord,
    routes: &HashMap<i64, Arc<RouteDefinition>>,
) -> Result<Arc<Enrollment>, ConversionError> {
    let route = routes
        .get(&record.route_id)
        .ok_or(ConversionError::UnknownRoute {
            enrollment: record.id,
            route: record.route_id,
        })?;

    let mut details = Vec::with_capacity(record.leg_details.len());
    for detail in &record.leg_details {
        if detail.travel_minutes < 0 || detail.wait_minutes < 0 {
            return Err(ConversionError::NegativeDuration {
                enrollment: record.id,
                detail: detail.id,
            });
        }
        details.push(LegDetail {
            id: LegDetailId(detail.id),
            route_leg: RouteLegId(detail.route_leg_id),
            travel: Duration::minutes(detail.travel_minutes),
            wait: Duration::minutes(detail.wait_minutes),
            cost_to_next: detail.cost_to_next,
        });
    }

    // Every leg of the route must be timed by this enrollment.
    for leg in route.legs() {
        if !details.iter().any(|d| d.route_leg == leg.id) {
            return Err(ConversionError::MissingLegDetail {
                enrollment: record.id,
                leg: leg.id.0,
            });
        }
    }

    let enrollment = Enrollment::new(
        EnrollmentId(record.id),
        Vehicle {
            kind: record.vehicle.kind.clone(),
            number: record.vehicle.number.clone(),
            company: record.vehicle.company.clone(),
        },
        route.clone(),
        record.departure,
        details,
        record.cancelled,
    )
    .map_err(|source| ConversionError::InvalidEnrollment {
        enrollment: record.id,
        source,
    })?;

    Ok(Arc::new(enrollment))
}
