//! Wire types for JSON network documents.
//!
//! A network document is a flat description of the schedule data the
//! engine searches: stops, route definitions referencing stops by id, and
//! enrollments referencing routes by id with per-leg details. References
//! are by raw integer id on the wire; `convert` resolves them into the
//! linked domain model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level network document.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkDoc {
    pub stops: Vec<StopRecord>,
    pub routes: Vec<RouteRecord>,
    pub enrollments: Vec<EnrollmentRecord>,
}

/// A stop with its owning city chain.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRecord {
    pub id: i64,
    pub name: String,
    pub city: CityRecord,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// City/region/country display chain for a stop.
#[derive(Debug, Clone, Deserialize)]
pub struct CityRecord {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
}

/// An ordered route over stops.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRecord {
    pub id: i64,
    /// Free-form type tag.
    #[serde(default)]
    pub kind: String,
    pub legs: Vec<RouteLegRecord>,
}

/// One position within a route. Legs may arrive unsorted; conversion
/// orders them by `order`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLegRecord {
    pub id: i64,
    pub stop_id: i64,
    pub order: u32,
}

/// One scheduled run of a vehicle over a route.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub route_id: i64,
    pub vehicle: VehicleRecord,
    /// Anchor departure at the route's first stop, UTC (RFC 3339).
    pub departure: DateTime<Utc>,
    #[serde(default)]
    pub cancelled: bool,
    pub leg_details: Vec<LegDetailRecord>,
}

/// Vehicle display data.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleRecord {
    pub kind: String,
    pub number: String,
    pub company: String,
}

/// Per-leg timing/cost for one enrollment.
#[derive(Debug, Clone, Deserialize)]
pub struct LegDetailRecord {
    pub id: i64,
    pub route_leg_id: i64,
    #[serde(default)]
    pub travel_minutes: i64,
    #[serde(default)]
    pub wait_minutes: i64,
    #[serde(default)]
    pub cost_to_next: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_document() {
        let json = r#"{
            "stops": [
                {"id": 1, "name": "North Terminal",
                 "city": {"id": 10, "name": "Alda", "region": "West", "country": "Freedonia"}}
            ],
            "routes": [
                {"id": 5, "kind": "express",
                 "legs": [{"id": 51, "stop_id": 1, "order": 1},
                          {"id": 52, "stop_id": 1, "order": 2}]}
            ],
            "enrollments": [
                {"id": 9, "route_id": 5,
                 "vehicle": {"kind": "coach", "number": "AB-12", "company": "Ridge Lines"},
                 "departure": "2024-01-01T07:00:00Z",
                 "leg_details": [{"id": 91, "route_leg_id": 51, "travel_minutes": 30, "cost_to_next": 4.5},
                                 {"id": 92, "route_leg_id": 52}]}
            ]
        }"#;

        let doc: NetworkDoc = serde_json::from_str(json).unwrap();

        assert_eq!(doc.stops.len(), 1);
        assert_eq!(doc.stops[0].city.country, "Freedonia");
        assert_eq!(doc.routes[0].legs.len(), 2);
        assert_eq!(doc.enrollments[0].leg_details[0].travel_minutes, 30);
        // Defaults fill in omitted terminal fields
        assert_eq!(doc.enrollments[0].leg_details[1].travel_minutes, 0);
        assert_eq!(doc.enrollments[0].leg_details[1].cost_to_next, 0.0);
        assert!(!doc.enrollments[0].cancelled);
    }
}
