//! Error types for the dappindex pipeline.

use thiserror::Error;

use crate::record::OperationRecordId;

/// Errors that can surface from a history store backend.
///
/// The engine's own algorithms are total: over a healthy backend none of
/// these occur during normal operation. They exist so fallible backends can
/// report I/O or corruption without panicking on the application path.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("history entry references missing record {0:?}")]
    MissingRecord(OperationRecordId),

    #[error("{0}")]
    Other(String),
}
