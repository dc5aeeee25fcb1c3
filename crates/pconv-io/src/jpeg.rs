//! JPEG format support.
//!
//! JPEG stores 8-bit luma or color without alpha. Decoded images map to
//! [`ChannelLayout::Gray`] or [`ChannelLayout::Rgb`]; writing an RGBA
//! buffer drops its alpha plane.
//!
//! # Example
//!
//! ```rust,ignore
//! use pconv_io::jpeg;
//!
//! let image = jpeg::read("photo.jpg")?;
//! jpeg::write_with_quality("preview.jpg", &image, 75)?;
//! ```

use crate::{IoError, IoResult};
use pconv_core::{ChannelLayout, PixelBuffer};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{trace, warn};

/// Quality used by [`write`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Largest width or height a JPEG frame can describe.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Reads a JPEG file from the given path.
///
/// CMYK input is converted to RGB with the naive `(1-c)(1-k)` formula;
/// 16-bit luma keeps its high byte.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    trace!(path = %path.display(), "jpeg::read");

    let file = File::open(path)?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let (layout, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (ChannelLayout::Rgb, pixels),
        jpeg_decoder::PixelFormat::L8 => (ChannelLayout::Gray, pixels),
        jpeg_decoder::PixelFormat::L16 => {
            let luma: Vec<u8> = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
            (ChannelLayout::Gray, luma)
        }
        jpeg_decoder::PixelFormat::CMYK32 => (ChannelLayout::Rgb, cmyk_to_rgb(&pixels)),
    };

    Ok(PixelBuffer::from_data(
        u32::from(info.width),
        u32::from(info.height),
        layout,
        data,
    )?)
}

/// Writes an image as JPEG with [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_QUALITY)
}

/// Writes an image as JPEG with an explicit quality in `1..=100`.
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), layout = %image.layout(), quality, "jpeg::write");

    if !(1..=100).contains(&quality) {
        return Err(IoError::EncodeError(format!("quality must be 1-100, got {}", quality)));
    }
    if image.width() > MAX_DIMENSION || image.height() > MAX_DIMENSION {
        return Err(IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG limit of {}",
            image.width(),
            image.height(),
            MAX_DIMENSION
        )));
    }

    let color_type = match image.layout() {
        ChannelLayout::Gray => jpeg_encoder::ColorType::Luma,
        ChannelLayout::Rgb => jpeg_encoder::ColorType::Rgb,
        ChannelLayout::Rgba => {
            warn!(path = %path.display(), "JPEG has no alpha channel, dropping it");
            jpeg_encoder::ColorType::Rgba
        }
    };

    let file = File::create(path)?;
    let encoder = jpeg_encoder::Encoder::new(BufWriter::new(file), quality);
    encoder
        .encode(image.data(), image.width() as u16, image.height() as u16, color_type)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

fn cmyk_to_rgb(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(4)
        .flat_map(|cmyk| {
            let k = 1.0 - cmyk[3] as f32 / 255.0;
            let channel = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0) as u8;
            [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
        })
        .collect()
}
