//! Search configuration for the itinerary engine.

use chrono::Duration;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum layover required at a transfer stop (minutes).
    /// Connections tighter than this are rejected; the boundary is closed,
    /// so a layover of exactly this many minutes is accepted.
    pub min_connection_mins: i64,

    /// Deadline for the upstream window fetch (seconds).
    /// `None` leaves timeouts to the store client.
    pub fetch_timeout_secs: Option<u64>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_connection_mins: i64, fetch_timeout_secs: Option<u64>) -> Self {
        Self {
            min_connection_mins,
            fetch_timeout_secs,
        }
    }

    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(self.min_connection_mins)
    }

    /// Returns the fetch deadline as a std Duration, if configured.
    pub fn fetch_timeout(&self) -> Option<std::time::Duration> {
        self.fetch_timeout_secs.map(std::time::Duration::from_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_connection_mins: 5,
            fetch_timeout_secs: None,
        }
    }
}
