//! Enrollment store boundary.
//!
//! The search engine reads schedule data through one query: every
//! enrollment departing in an inclusive date range, fully materialized
//! (route with ordered legs, each leg's stop with its city chain, leg
//! details, vehicle and company). This module provides that boundary as a
//! trait, an in-memory implementation backed by JSON network documents,
//! and the wire-to-domain conversion.

mod convert;
mod error;
mod memory;
mod types;

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::Enrollment;

pub use convert::{ConversionError, convert_network};
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use types::{
    CityRecord, EnrollmentRecord, LegDetailRecord, NetworkDoc, RouteLegRecord, RouteRecord,
    StopRecord, VehicleRecord,
};

/// Source of scheduled enrollments.
///
/// This abstraction is the engine's only I/O boundary; it allows the
/// search to be tested against in-memory data.
pub trait EnrollmentStore {
    /// Get every enrollment whose departure date (UTC date component)
    /// falls in `[from, to]` inclusive.
    ///
    /// Cancelled enrollments are returned too; filtering is the caller's
    /// concern.
    fn enrollments_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Arc<Enrollment>>, StoreError>> + Send;
}
