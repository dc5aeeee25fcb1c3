//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem error while opening, reading or creating a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Neither PNG nor JPEG (or the codec feature is off).
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The codec rejected the input.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The codec could not write the raster.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported color type or bit depth.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded data does not form a valid raster.
    #[error(transparent)]
    Image(#[from] pconv_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
