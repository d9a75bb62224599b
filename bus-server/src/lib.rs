//! Bus itinerary search engine.
//!
//! Answers: "how do I get from this stop to that stop on this date?"
//! by searching scheduled vehicle runs over ordered stop sequences,
//! returning direct trips and single-transfer connections.

pub mod cache;
pub mod domain;
pub mod search;
pub mod store;
