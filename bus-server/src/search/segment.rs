//! Trimmed trip views and the leg timeline calculation.
//!
//! A `TripSegment` is an immutable view over a sub-range of an enrollment's
//! route. Trimming never mutates the underlying enrollment or route: each
//! segment is just `{Arc<Enrollment>, start, end}`, so the same enrollment
//! can back any number of segments across transfer pairs without aliasing.
//!
//! Absolute times and cost are reconstructed at construction by walking the
//! enrollment's per-leg details from the route's first leg:
//!
//! - boarding time at `start` = anchor + Σ(travel+wait) before `start`,
//!   plus `start`'s own wait (boarding happens after the scheduled dwell);
//! - arrival time at `end` = anchor + Σ(travel+wait) strictly before `end`
//!   (the alighting leg's own wait is not added);
//! - cost = Σ cost-to-next over legs `start..end`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{DomainError, Enrollment, RouteLeg, Stop};

/// An enrollment trimmed to a closed sub-range of its route's stop order.
///
/// Times are computed and cached at construction, so `departure_time()`
/// and `arrival_time()` never fail.
///
/// # Invariants
///
/// - `end > start` (must travel forward)
/// - Both positions are valid for the route's leg list
/// - Every leg in `[0, end)` has a leg detail on the enrollment
#[derive(Debug, Clone)]
pub struct TripSegment {
    enrollment: Arc<Enrollment>,
    start: usize,
    end: usize,
    // Cached validated timeline (guaranteed present - computed at construction)
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    cost: f64,
}

impl TripSegment {
    /// Construct a segment over `[start, end]`, reconstructing its timeline.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `end <= start`, if either position is out of bounds,
    /// or if a leg before `end` has no detail on the enrollment.
    pub fn new(enrollment: Arc<Enrollment>, start: usize, end: usize) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidSegment(
                "alight position must be after board position",
            ));
        }
        if end >= enrollment.route.legs().len() {
            return Err(DomainError::InvalidSegment("position out of bounds"));
        }

        let mut clock = enrollment.departure;
        let mut departure = enrollment.departure;
        let mut cost = 0.0;

        for (pos, leg) in enrollment.route.legs().iter().enumerate().take(end) {
            let detail = enrollment
                .detail_for(leg.id)
                .ok_or(DomainError::MissingLegDetail(leg.id))?;

            if pos == start {
                departure = clock + detail.wait;
            }
            if pos >= start {
                cost += detail.cost_to_next;
            }
            clock = clock + detail.wait + detail.travel;
        }

        Ok(Self {
            enrollment,
            start,
            end,
            departure,
            arrival: clock,
            cost,
        })
    }

    /// Returns the enrollment this segment is a view of.
    pub fn enrollment(&self) -> &Arc<Enrollment> {
        &self.enrollment
    }

    /// Returns the boarding position within the route's leg list.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the alighting position within the route's leg list.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the boarding leg.
    pub fn board_leg(&self) -> &RouteLeg {
        // Safe: validated at construction
        &self.enrollment.route.legs()[self.start]
    }

    /// Returns the alighting leg.
    pub fn alight_leg(&self) -> &RouteLeg {
        // Safe: validated at construction
        &self.enrollment.route.legs()[self.end]
    }

    /// Returns the boarding stop.
    pub fn board_stop(&self) -> &Stop {
        &self.board_leg().stop
    }

    /// Returns the alighting stop.
    pub fn alight_stop(&self) -> &Stop {
        &self.alight_leg().stop
    }

    /// Returns the effective boarding time (guaranteed present).
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the arrival time at the alighting stop (guaranteed present).
    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// Returns the summed cost over the trimmed range.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns the travel duration from boarding to alighting.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }

    /// Returns the legs covered by this segment, boarding to alighting
    /// inclusive.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.enrollment.route.legs()[self.start..=self.end]
    }

    /// Returns a copy trimmed to alight earlier, at `end`.
    ///
    /// Used by transfer matching to keep only the boarding-to-transfer part.
    pub fn shrink_to_end(&self, end: usize) -> Result<Self, DomainError> {
        Self::new(self.enrollment.clone(), self.start, end)
    }

    /// Returns a copy trimmed to board later, at `start`.
    ///
    /// Used by transfer matching to keep only the transfer-to-alighting part.
    pub fn shrink_to_start(&self, start: usize) -> Result<Self, DomainError> {
        Self::new(self.enrollment.clone(), start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        City, CityId, EnrollmentId, LegDetail, LegDetailId, RouteDefinition, RouteId, RouteLegId,
        StopId, Vehicle,
    };
    use chrono::TimeZone;

    fn stop(id: i64) -> Arc<Stop> {
        Arc::new(Stop {
            id: StopId(id),
            name: format!("Stop {id}"),
            city: City {
                id: CityId(id),
                name: format!("City {id}"),
                region: "Region".into(),
                country: "Country".into(),
            },
            latitude: 0.0,
            longitude: 0.0,
        })
    }

    fn route(stop_count: i64) -> Arc<RouteDefinition> {
        let legs = (1..=stop_count)
            .map(|i| RouteLeg {
                id: RouteLegId(i * 10),
                stop: stop(i),
                order: i as u32,
            })
            .collect();
        Arc::new(RouteDefinition::new(RouteId(1), "regular".into(), legs).unwrap())
    }

    /// `(travel_mins, wait_mins, cost)` per leg, in route order.
    fn enrollment(details: &[(i64, i64, f64)]) -> Arc<Enrollment> {
        let route = route(details.len() as i64);
        let details = details
            .iter()
            .enumerate()
            .map(|(i, (travel, wait, cost))| LegDetail {
                id: LegDetailId(i as i64 + 100),
                route_leg: RouteLegId((i as i64 + 1) * 10),
                travel: Duration::minutes(*travel),
                wait: Duration::minutes(*wait),
                cost_to_next: *cost,
            })
            .collect();

        Arc::new(
            Enrollment::new(
                EnrollmentId(1),
                Vehicle {
                    kind: "coach".into(),
                    number: "AB-1234".into(),
                    company: "Plateau Lines".into(),
                },
                route,
                Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap(),
                details,
                false,
            )
            .unwrap(),
        )
    }

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn full_route_timeline() {
        // S1 -(20m)-> S2 -(15m)-> S3, no waits, cost on the second leg only
        let e = enrollment(&[(20, 0, 0.0), (15, 0, 10.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 0, 2).unwrap();

        assert_eq!(segment.departure_time(), utc(7, 0));
        assert_eq!(segment.arrival_time(), utc(7, 35));
        assert_eq!(segment.cost(), 10.0);
        assert_eq!(segment.duration(), Duration::minutes(35));
    }

    #[test]
    fn boarding_adds_the_boarding_legs_wait() {
        // 5 minute dwell at the first stop before departure
        let e = enrollment(&[(20, 5, 0.0), (15, 0, 0.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 0, 2).unwrap();

        assert_eq!(segment.departure_time(), utc(7, 5));
    }

    #[test]
    fn arrival_excludes_the_alighting_legs_wait() {
        // Big dwell at S2; arriving there must not include it
        let e = enrollment(&[(20, 0, 0.0), (15, 30, 0.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e.clone(), 0, 1).unwrap();

        assert_eq!(segment.arrival_time(), utc(7, 20));

        // But boarding at S2 waits out the dwell
        let onward = TripSegment::new(e, 1, 2).unwrap();
        assert_eq!(onward.departure_time(), utc(7, 50));
        assert_eq!(onward.arrival_time(), utc(8, 5));
    }

    #[test]
    fn mid_route_boarding_accumulates_earlier_legs() {
        let e = enrollment(&[(20, 5, 1.0), (10, 3, 2.0), (30, 2, 4.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 1, 3).unwrap();

        // Arrive S2 at 07:25, dwell 3 -> board 07:28
        assert_eq!(segment.departure_time(), utc(7, 28));
        // Arrive S4: 07:00 + (5+20) + (3+10) + (2+30) = 08:10
        assert_eq!(segment.arrival_time(), utc(8, 10));
        // Cost of legs S2 and S3 only
        assert_eq!(segment.cost(), 6.0);
    }

    #[test]
    fn cost_excludes_the_alighting_legs_outgoing_cost() {
        let e = enrollment(&[(10, 0, 1.0), (10, 0, 2.0), (10, 0, 4.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 0, 2).unwrap();

        assert_eq!(segment.cost(), 3.0);
    }

    #[test]
    fn board_and_alight_stops() {
        let e = enrollment(&[(10, 0, 0.0), (10, 0, 0.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 0, 2).unwrap();

        assert_eq!(segment.board_stop().id, StopId(1));
        assert_eq!(segment.alight_stop().id, StopId(3));
        assert_eq!(segment.legs().len(), 3);
    }

    #[test]
    fn rejects_alight_before_board() {
        let e = enrollment(&[(10, 0, 0.0), (10, 0, 0.0), (0, 0, 0.0)]);
        assert!(matches!(
            TripSegment::new(e, 2, 1),
            Err(DomainError::InvalidSegment(_))
        ));
    }

    #[test]
    fn rejects_zero_length_segment() {
        let e = enrollment(&[(10, 0, 0.0), (10, 0, 0.0), (0, 0, 0.0)]);
        assert!(matches!(
            TripSegment::new(e, 1, 1),
            Err(DomainError::InvalidSegment(_))
        ));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let e = enrollment(&[(10, 0, 0.0), (10, 0, 0.0), (0, 0, 0.0)]);
        assert!(matches!(
            TripSegment::new(e, 0, 3),
            Err(DomainError::InvalidSegment(_))
        ));
    }

    #[test]
    fn missing_detail_fails_construction() {
        // Build an enrollment with a detail gap on the middle leg.
        let route = route(3);
        let details = vec![
            LegDetail {
                id: LegDetailId(100),
                route_leg: RouteLegId(10),
                travel: Duration::minutes(10),
                wait: Duration::zero(),
                cost_to_next: 0.0,
            },
            LegDetail {
                id: LegDetailId(102),
                route_leg: RouteLegId(30),
                travel: Duration::zero(),
                wait: Duration::zero(),
                cost_to_next: 0.0,
            },
        ];
        let e = Arc::new(
            Enrollment::new(
                EnrollmentId(1),
                Vehicle {
                    kind: "coach".into(),
                    number: "X".into(),
                    company: "Y".into(),
                },
                route,
                Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap(),
                details,
                false,
            )
            .unwrap(),
        );

        assert_eq!(
            TripSegment::new(e.clone(), 0, 2).unwrap_err(),
            DomainError::MissingLegDetail(RouteLegId(20))
        );
        // A range that never walks past the gap is still fine
        assert!(TripSegment::new(e, 0, 1).is_ok());
    }

    #[test]
    fn shrink_to_end_keeps_boarding() {
        let e = enrollment(&[(10, 0, 1.0), (10, 0, 2.0), (10, 0, 4.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 0, 3).unwrap();

        let shrunk = segment.shrink_to_end(1).unwrap();
        assert_eq!(shrunk.start(), 0);
        assert_eq!(shrunk.end(), 1);
        assert_eq!(shrunk.cost(), 1.0);
        // The original is untouched
        assert_eq!(segment.end(), 3);
        assert_eq!(segment.cost(), 7.0);
    }

    #[test]
    fn shrink_to_start_keeps_alighting() {
        let e = enrollment(&[(10, 0, 1.0), (10, 0, 2.0), (10, 0, 4.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 0, 3).unwrap();

        let shrunk = segment.shrink_to_start(2).unwrap();
        assert_eq!(shrunk.start(), 2);
        assert_eq!(shrunk.end(), 3);
        assert_eq!(shrunk.cost(), 4.0);
    }

    #[test]
    fn shrink_to_boarding_position_is_rejected() {
        let e = enrollment(&[(10, 0, 0.0), (10, 0, 0.0), (0, 0, 0.0)]);
        let segment = TripSegment::new(e, 0, 2).unwrap();

        assert!(segment.shrink_to_end(0).is_err());
        assert!(segment.shrink_to_start(2).is_err());
    }
}
