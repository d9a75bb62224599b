//! Store error types.

use super::ConversionError;

/// Errors from an enrollment store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading network data failed (file missing, permission, ...).
    #[error("failed to read network data: {0}")]
    Io(#[from] std::io::Error),

    /// Network data is not valid JSON.
    #[error("failed to parse network data: {0}")]
    Json(#[from] serde_json::Error),

    /// Network data parsed but doesn't form a valid schedule.
    #[error("invalid network data: {0}")]
    Conversion(#[from] ConversionError),

    /// The backing store failed (connection loss, query error, ...).
    #[error("store backend failure: {0}")]
    Backend(String),
}
