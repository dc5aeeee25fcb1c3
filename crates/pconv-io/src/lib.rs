//! # pconv-io
//!
//! Loading and saving of 8-bit rasters for the pconv tools.
//!
//! Every supported file is normalized on read to a
//! [`PixelBuffer`](pconv_core::PixelBuffer) with 1, 3 or 4 channels:
//!
//! - **PNG** - lossless, keeps gray/RGB/RGBA layout
//! - **JPEG** - lossy, gray or RGB only
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pconv_io::{read, write};
//!
//! // Format detected from magic bytes, then extension
//! let image = read("input.jpg")?;
//!
//! // Format chosen from the output extension
//! write("output.png", &image)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};

#[cfg(feature = "jpeg")]
pub use jpeg::write_with_quality as write_jpeg_with_quality;

use pconv_core::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// Reads an image, detecting its format from content and extension.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] when the file is neither PNG nor JPEG
/// (or the matching feature is disabled).
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "Reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

/// Writes an image in the format named by the path's extension.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), ?format, "Writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

#[cfg(all(test, feature = "png", feature = "jpeg"))]
mod tests {
    use super::*;
    use pconv_core::ChannelLayout;

    #[test]
    fn test_dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = PixelBuffer::from_data(4, 2, ChannelLayout::Rgb, vec![50; 24]).unwrap();

        let png_path = dir.path().join("a.png");
        write(&png_path, &image).unwrap();
        assert_eq!(Format::detect(&png_path).unwrap(), Format::Png);
        assert_eq!(read(&png_path).unwrap(), image);

        let jpg_path = dir.path().join("a.jpeg");
        write(&jpg_path, &image).unwrap();
        assert_eq!(Format::detect(&jpg_path).unwrap(), Format::Jpeg);
        assert_eq!(read(&jpg_path).unwrap().layout(), ChannelLayout::Rgb);
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = PixelBuffer::new(1, 1, ChannelLayout::Gray).unwrap();

        let err = write(dir.path().join("out.tga"), &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ref ext) if ext == "tga"));

        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read(dir.path().join("missing.png")), Err(IoError::Io(_))));
    }
}
