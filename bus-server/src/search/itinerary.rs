//! Itinerary output types.
//!
//! An `Itinerary` is the engine's output unit: an ordered list of one or
//! two hops with a total duration and cost. These are transient values
//! built per query, shaped for direct serialization to callers.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::{EnrollmentId, StopId};

use super::segment::TripSegment;

/// One enrollment segment used within an itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct Hop {
    /// The enrollment this hop rides.
    pub enrollment: EnrollmentId,

    pub boarding_stop: StopId,
    pub boarding_stop_name: String,
    pub boarding_full_name: String,
    pub boarding_time: DateTime<Utc>,

    pub alighting_stop: StopId,
    pub alighting_stop_name: String,
    pub alighting_full_name: String,
    pub alighting_time: DateTime<Utc>,

    /// 1-based position within the itinerary.
    pub position: u32,

    pub vehicle_kind: String,
    pub vehicle_number: String,
    pub company_name: String,
}

impl Hop {
    fn from_segment(segment: &TripSegment, position: u32) -> Self {
        let enrollment = segment.enrollment();
        let board = segment.board_stop();
        let alight = segment.alight_stop();

        Self {
            enrollment: enrollment.id,
            boarding_stop: board.id,
            boarding_stop_name: board.name.clone(),
            boarding_full_name: board.full_name(),
            boarding_time: segment.departure_time(),
            alighting_stop: alight.id,
            alighting_stop_name: alight.name.clone(),
            alighting_full_name: alight.full_name(),
            alighting_time: segment.arrival_time(),
            position,
            vehicle_kind: enrollment.vehicle.kind.clone(),
            vehicle_number: enrollment.vehicle.number.clone(),
            company_name: enrollment.vehicle.company.clone(),
        }
    }
}

/// A complete origin-to-destination travel plan of one or two hops.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    /// Hops in travel order.
    pub hops: Vec<Hop>,

    /// Last hop's arrival minus first hop's departure.
    #[serde(serialize_with = "serialize_duration_secs")]
    pub total_duration: Duration,

    /// Sum of each hop's leg costs. Plain float accumulation, no
    /// currency rounding.
    pub total_cost: f64,
}

impl Itinerary {
    /// Builds a single-hop itinerary from a direct trip segment.
    pub fn direct(segment: &TripSegment) -> Self {
        Self {
            hops: vec![Hop::from_segment(segment, 1)],
            total_duration: segment.duration(),
            total_cost: segment.cost(),
        }
    }

    /// Builds a two-hop itinerary from a transfer pair.
    ///
    /// The caller has already trimmed both segments to meet at the transfer
    /// stop and verified the connection buffer.
    pub fn with_transfer(first: &TripSegment, second: &TripSegment) -> Self {
        Self {
            hops: vec![Hop::from_segment(first, 1), Hop::from_segment(second, 2)],
            total_duration: second.arrival_time() - first.departure_time(),
            total_cost: first.cost() + second.cost(),
        }
    }

    /// Returns true if this itinerary has no transfer.
    pub fn is_direct(&self) -> bool {
        self.hops.len() == 1
    }

    /// Returns the overall departure time.
    pub fn departure_time(&self) -> DateTime<Utc> {
        // Safe: always built with at least one hop
        self.hops[0].boarding_time
    }

    /// Returns the overall arrival time.
    pub fn arrival_time(&self) -> DateTime<Utc> {
        // Safe: always built with at least one hop
        self.hops[self.hops.len() - 1].alighting_time
    }
}

fn serialize_duration_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_i64(duration.num_seconds())
}
