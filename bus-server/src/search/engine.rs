//! Itinerary search over scheduled enrollments.
//!
//! One store read pulls every enrollment departing inside a fixed four-day
//! window, then the whole search runs in memory: direct candidates first,
//! then one-transfer candidates built from the cross product of partial
//! paths through the origin and through the destination.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::domain::{CityId, DomainError, Enrollment, Stop, StopId};
use crate::store::{EnrollmentStore, StoreError};

use super::config::SearchConfig;
use super::itinerary::Itinerary;
use super::segment::TripSegment;

/// Number of calendar days in the candidate window, query date included.
///
/// Enrollments departing after `date + 3` are invisible to the search even
/// when they would otherwise connect. This is a hard scope boundary of the
/// product, not a performance knob, so it is not part of `SearchConfig`.
const CANDIDATE_WINDOW_DAYS: i64 = 4;

/// Error from itinerary search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No direct or one-transfer itinerary exists in the window.
    ///
    /// A normal negative outcome, distinguishable from an empty success so
    /// callers can map it (e.g. to a 404).
    #[error("no itinerary found")]
    NotFound,

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// The upstream window fetch failed. Fatal to this query; never
    /// retried here.
    #[error("store query failed: {0}")]
    Store(#[from] StoreError),

    /// The upstream window fetch exceeded the configured deadline.
    #[error("store query timed out")]
    Timeout,
}

/// Matching granularity for one end of a search.
///
/// The product historically answered both "stop to stop" and "city to
/// city" queries with two diverging copies of this algorithm; here both
/// are modes of one engine. The key decides how a query end is matched
/// against route stops and how transfer points are intersected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// Match a specific stop by id.
    Stop(StopId),
    /// Match any stop belonging to the city.
    City(CityId),
}

impl SearchKey {
    /// Extracts this key's granularity from an arbitrary stop.
    fn of(&self, stop: &Stop) -> SearchKey {
        match self {
            SearchKey::Stop(_) => SearchKey::Stop(stop.id),
            SearchKey::City(_) => SearchKey::City(stop.city_id()),
        }
    }

    /// Returns true if the stop matches this key.
    fn matches(&self, stop: &Stop) -> bool {
        self.of(stop) == *self
    }

    fn same_granularity(&self, other: &SearchKey) -> bool {
        matches!(
            (self, other),
            (SearchKey::Stop(_), SearchKey::Stop(_)) | (SearchKey::City(_), SearchKey::City(_))
        )
    }
}

/// Request for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Where travel begins.
    pub origin: SearchKey,

    /// Where travel ends.
    pub destination: SearchKey,

    /// First day of the candidate window (UTC calendar date).
    pub date: NaiveDate,
}

impl SearchRequest {
    /// Stop-granularity request.
    pub fn between_stops(origin: StopId, destination: StopId, date: NaiveDate) -> Self {
        Self {
            origin: SearchKey::Stop(origin),
            destination: SearchKey::Stop(destination),
            date,
        }
    }

    /// City-granularity request.
    pub fn between_cities(origin: CityId, destination: CityId, date: NaiveDate) -> Self {
        Self {
            origin: SearchKey::City(origin),
            destination: SearchKey::City(destination),
            date,
        }
    }

    /// Validate the search request.
    ///
    /// Whether the referenced stop/city exists is deliberately not checked:
    /// an unknown id matches no route legs and surfaces as `NotFound`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.origin.same_granularity(&self.destination) {
            return Err(SearchError::InvalidRequest(
                "origin and destination must use the same granularity".to_string(),
            ));
        }
        if self.origin == self.destination {
            return Err(SearchError::InvalidRequest(
                "origin and destination are the same".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a successful itinerary search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Found itineraries: accepted transfers in cross-product order,
    /// then direct trips. Never empty.
    pub itineraries: Vec<Itinerary>,

    /// Number of candidate enrollments examined.
    pub candidates_examined: usize,
}

/// The itinerary search engine.
///
/// Pure computation over one window fetch; holds no state between
/// searches, so one engine value can serve concurrent callers.
pub struct ItineraryEngine<'a, S: EnrollmentStore> {
    store: &'a S,
    config: &'a SearchConfig,
}

impl<'a, S: EnrollmentStore> ItineraryEngine<'a, S> {
    /// Create a new engine over a store.
    pub fn new(store: &'a S, config: &'a SearchConfig) -> Self {
        Self { store, config }
    }

    /// Search for itineraries matching the request.
    ///
    /// # Errors
    ///
    /// `NotFound` when the window holds no feasible itinerary;
    /// `InvalidRequest` for a malformed request; `Store`/`Timeout` when the
    /// window fetch fails or misses its deadline.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        request.validate()?;

        let candidates = self.fetch_window(request.date).await?;
        let candidates_examined = candidates.len();

        let (directs, rest) = self.split_directs(&request.origin, &request.destination, candidates);

        let from_set = self.partial_segments(&rest, |enrollment| {
            let start = enrollment
                .route
                .position_matching(|stop| request.origin.matches(stop))?;
            Some((start, enrollment.route.last_position()))
        });
        let to_set = self.partial_segments(&rest, |enrollment| {
            let end = enrollment
                .route
                .position_matching(|stop| request.destination.matches(stop))?;
            Some((0, end))
        });

        debug!(
            candidates = candidates_examined,
            directs = directs.len(),
            from_set = from_set.len(),
            to_set = to_set.len(),
            "classified candidate window"
        );

        let mut itineraries = self.match_transfers(&request.origin, &from_set, &to_set);
        let transfers = itineraries.len();
        itineraries.extend(directs.iter().map(Itinerary::direct));

        debug!(
            transfers,
            directs = directs.len(),
            "itinerary search complete"
        );

        if itineraries.is_empty() {
            return Err(SearchError::NotFound);
        }

        Ok(SearchOutcome {
            itineraries,
            candidates_examined,
        })
    }

    /// Fetch every enrollment departing in `[date, date + 3]`, dropping
    /// cancelled runs.
    async fn fetch_window(&self, date: NaiveDate) -> Result<Vec<Arc<Enrollment>>, SearchError> {
        let date_to = date + Duration::days(CANDIDATE_WINDOW_DAYS - 1);

        let fetched = match self.config.fetch_timeout() {
            Some(limit) => {
                tokio::time::timeout(limit, self.store.enrollments_between(date, date_to))
                    .await
                    .map_err(|_| SearchError::Timeout)??
            }
            None => self.store.enrollments_between(date, date_to).await?,
        };

        Ok(fetched.into_iter().filter(|e| !e.cancelled).collect())
    }

    /// Classify candidates into direct segments and the remainder pool.
    ///
    /// An enrollment is direct when its route matches the origin strictly
    /// before the destination; it is then excluded from partial-path
    /// consideration. Candidates with unusable timing data are dropped.
    fn split_directs(
        &self,
        origin: &SearchKey,
        destination: &SearchKey,
        candidates: Vec<Arc<Enrollment>>,
    ) -> (Vec<TripSegment>, Vec<Arc<Enrollment>>) {
        let mut directs = Vec::new();
        let mut rest = Vec::new();

        for enrollment in candidates {
            let boarding = enrollment
                .route
                .position_matching(|stop| origin.matches(stop));
            let alighting = enrollment
                .route
                .position_matching(|stop| destination.matches(stop));

            match (boarding, alighting) {
                (Some(start), Some(end)) if start < end => {
                    match TripSegment::new(enrollment.clone(), start, end) {
                        Ok(segment) => directs.push(segment),
                        Err(error) => {
                            warn!(enrollment = %enrollment.id, %error, "skipping direct candidate");
                        }
                    }
                }
                _ => rest.push(enrollment),
            }
        }

        (directs, rest)
    }

    /// Build partial segments over the non-direct pool.
    ///
    /// `range_for` yields the trim range for one enrollment, or `None` when
    /// it doesn't participate. Degenerate ranges (empty travel) and
    /// candidates with unusable timing data are skipped.
    fn partial_segments(
        &self,
        pool: &[Arc<Enrollment>],
        range_for: impl Fn(&Arc<Enrollment>) -> Option<(usize, usize)>,
    ) -> Vec<TripSegment> {
        pool.iter()
            .filter_map(|enrollment| {
                let (start, end) = range_for(enrollment)?;
                match TripSegment::new(enrollment.clone(), start, end) {
                    Ok(segment) => Some(segment),
                    // Origin at the route's last leg or destination at its
                    // first: nothing to ride, not an error.
                    Err(DomainError::InvalidSegment(_)) => None,
                    Err(error) => {
                        warn!(enrollment = %enrollment.id, %error, "skipping partial candidate");
                        None
                    }
                }
            })
            .collect()
    }

    /// Pair up partial segments into one-transfer itineraries.
    ///
    /// Iteration order (from-set outer, to-set inner) is the result order.
    fn match_transfers(
        &self,
        key: &SearchKey,
        from_set: &[TripSegment],
        to_set: &[TripSegment],
    ) -> Vec<Itinerary> {
        let mut itineraries = Vec::new();

        for ef in from_set {
            for et in to_set {
                let Some((transfer_out, transfer_in)) = first_common_point(key, ef, et) else {
                    continue;
                };

                // Trim to the transfer point. A transfer at ef's boarding
                // stop or at et's alighting stop collapses a hop to nothing
                // and rejects the pair.
                let Ok(first) = ef.shrink_to_end(transfer_out) else {
                    continue;
                };
                let Ok(second) = et.shrink_to_start(transfer_in) else {
                    continue;
                };

                let layover = second.departure_time() - first.arrival_time();
                if layover >= self.config.min_connection() {
                    itineraries.push(Itinerary::with_transfer(&first, &second));
                }
            }
        }

        itineraries
    }
}

/// Find the transfer point between two partial segments.
///
/// Scans `ef`'s trimmed legs in order and takes the first whose key (stop
/// or city, per the request granularity) also appears in `et`'s trimmed
/// range; within `et` the earliest occurrence wins. There is no secondary
/// tie-break: later shared points are never considered.
fn first_common_point(
    key: &SearchKey,
    ef: &TripSegment,
    et: &TripSegment,
) -> Option<(usize, usize)> {
    for (offset, leg) in ef.legs().iter().enumerate() {
        let shared = key.of(&leg.stop);
        if let Some(et_offset) = et
            .legs()
            .iter()
            .position(|candidate| key.of(&candidate.stop) == shared)
        {
            return Some((ef.start() + offset, et.start() + et_offset));
        }
    }
    None
}
