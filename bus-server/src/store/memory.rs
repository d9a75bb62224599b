//! In-memory enrollment store.
//!
//! Serves pre-loaded enrollments, either built directly from domain values
//! (tests) or loaded from a JSON network document (demo binary and
//! development without a database).

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::Enrollment;

use super::EnrollmentStore;
use super::convert::convert_network;
use super::error::StoreError;
use super::types::NetworkDoc;

/// Enrollment store backed by a plain vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    enrollments: Vec<Arc<Enrollment>>,
}

impl InMemoryStore {
    /// Create a store over the given enrollments.
    pub fn new(enrollments: Vec<Arc<Enrollment>>) -> Self {
        Self { enrollments }
    }

    /// Load a store from a JSON network document string.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let doc: NetworkDoc = serde_json::from_str(json)?;
        Ok(Self::new(convert_network(doc)?))
    }

    /// Load a store from a JSON network document file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Number of enrollments held.
    pub fn len(&self) -> usize {
        self.enrollments.len()
    }

    /// Returns true if the store holds no enrollments.
    pub fn is_empty(&self) -> bool {
        self.enrollments.is_empty()
    }
}

impl EnrollmentStore for InMemoryStore {
    async fn enrollments_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Arc<Enrollment>>, StoreError> {
        Ok(self
            .enrollments
            .iter()
            .filter(|enrollment| {
                let date = enrollment.departure.date_naive();
                date >= from && date <= to
            })
            .cloned()
            .collect())
    }
}
