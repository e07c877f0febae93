//! Error types for the engine and the BMP codec.

use crate::engine::RowRange;
use thiserror::Error;

/// Failures raised by the partitioned convolution engine.
///
/// Everything except `InvalidArgument` indicates a broken invariant in the
/// dispatch layer or a dead worker; none of these are recoverable and all of
/// them abort the run before any output is produced.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected before any work starts (bad worker count, bad dimensions).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A partition range never received its worker result.
    #[error("incomplete partition: no result for {missing}")]
    IncompletePartition { missing: RowRange },

    /// A result arrived for a range that is not part of the partition.
    #[error("unexpected range in results: {range}")]
    UnexpectedRange { range: RowRange },

    /// The same range was delivered twice.
    #[error("duplicate result for {range}")]
    DuplicateRange { range: RowRange },

    /// A worker died or produced a malformed result buffer.
    #[error("worker {worker} failed: {reason}")]
    WorkerFailure { worker: usize, reason: String },
}

/// Failures raised while decoding or encoding BMP files.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("not a BMP file (bad magic)")]
    BadMagic,

    #[error("unsupported BMP variant: {0}")]
    Unsupported(String),

    #[error("truncated BMP payload: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
