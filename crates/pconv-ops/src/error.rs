//! Error types for convolution operations.

use std::ops::Range;
use thiserror::Error;

/// Error type for convolution operations.
///
/// Variants fall into two groups:
/// - configuration errors ([`is_configuration_error`](Self::is_configuration_error)),
///   reported before any buffer is allocated
/// - resource errors ([`is_resource_error`](Self::is_resource_error)),
///   which fail the whole call with no partial result
#[derive(Error, Debug)]
pub enum OpsError {
    /// Kernel shape or weights are unusable.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A working buffer could not be allocated.
    #[error("failed to allocate {requested} bytes for {buffer} buffer")]
    AllocationFailed {
        /// Which buffer ("padded", "output").
        buffer: &'static str,
        /// Bytes requested.
        requested: usize,
    },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// A worker could not complete its row range.
    #[error("worker for rows {}..{} failed: {reason}", .rows.start, .rows.end)]
    WorkerFailed {
        /// Rows assigned to the worker.
        rows: Range<usize>,
        /// Failure reason.
        reason: String,
    },

    /// Invalid input raster.
    #[error(transparent)]
    Image(#[from] pconv_core::Error),
}

impl OpsError {
    /// Returns `true` for errors caused by bad arguments (kernel shape, thread count).
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidKernel(_) | Self::InvalidParameter(_))
    }

    /// Returns `true` for allocation, pool or worker failures.
    pub fn is_resource_error(&self) -> bool {
        match self {
            Self::AllocationFailed { .. } | Self::ThreadPool(_) | Self::WorkerFailed { .. } => true,
            Self::Image(e) => e.is_allocation_error(),
            _ => false,
        }
    }
}

/// Result type for convolution operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(OpsError::InvalidKernel("even".into()).is_configuration_error());
        assert!(OpsError::InvalidParameter("threads".into()).is_configuration_error());
        assert!(!OpsError::InvalidKernel("even".into()).is_resource_error());

        let alloc = OpsError::AllocationFailed { buffer: "padded", requested: 64 };
        assert!(alloc.is_resource_error());
        assert!(!alloc.is_configuration_error());

        let core = OpsError::from(pconv_core::Error::allocation_failed(8, "oom"));
        assert!(core.is_resource_error());
    }

    #[test]
    fn test_worker_failed_message() {
        let err = OpsError::WorkerFailed {
            rows: 4..8,
            reason: "short slice".into(),
        };
        assert_eq!(err.to_string(), "worker for rows 4..8 failed: short slice");
    }
}
