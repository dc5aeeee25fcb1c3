//! Error types for pconv-core operations.
//!
//! The [`Error`] enum covers the failure modes of raster construction
//! and access:
//! - Dimension and data-length validation
//! - Unsupported channel counts
//! - Plane / channel mismatches when recombining alpha
//! - Pixel bounds checks
//! - Allocation failures for large rasters
//!
//! # Usage
//!
//! ```rust
//! use pconv_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! assert!(check(3, 0, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Shorthand for results of raster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing a raster.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the sample count does not fit.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Width passed to the constructor
        width: u32,
        /// Height passed to the constructor
        height: u32,
        /// What was wrong with them
        reason: String,
    },

    /// Channel count is not 1 (gray), 3 (RGB) or 4 (RGBA).
    #[error("unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    /// Channel count mismatch between an operation and a buffer.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Channels the operation needs
        expected: usize,
        /// Channels it was given
        got: usize,
    },

    /// Pixel coordinates fall outside the raster.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// Column
        x: u32,
        /// Row
        y: u32,
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },

    /// A raster buffer could not be reserved.
    #[error("cannot reserve {requested} samples: {reason}")]
    AllocationFailed {
        /// Sample count that could not be reserved
        requested: usize,
        /// Allocator message
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
