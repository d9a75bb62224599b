//! The itinerary search engine.
//!
//! This module answers the product's core question: "how do I get from
//! here to there on this date?" It selects a four-day candidate window of
//! scheduled enrollments, matches direct routes, and pairs partial routes
//! into single-transfer itineraries with a minimum connection buffer.

mod config;
mod engine;
mod itinerary;
mod segment;


pub use config::SearchConfig;
pub use engine::{ItineraryEngine, SearchError, SearchKey, SearchOutcome, SearchRequest};
pub use itinerary::{Hop, Itinerary};
pub use segment::TripSegment;
