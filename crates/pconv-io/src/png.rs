//! PNG format support.
//!
//! Every PNG is normalized to an 8-bit [`PixelBuffer`] on read:
//! palette and sub-8-bit images are expanded, 16-bit samples are
//! stripped to their high byte, and gray+alpha is widened to RGBA.
//!
//! # Example
//!
//! ```rust,ignore
//! use pconv_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use pconv_core::{ChannelLayout, PixelBuffer};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::trace;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    trace!(path = %path.display(), "png::read");

    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedBitDepth(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let (layout, data) = match info.color_type {
        png::ColorType::Grayscale => (ChannelLayout::Gray, buf),
        png::ColorType::Rgb => (ChannelLayout::Rgb, buf),
        png::ColorType::Rgba => (ChannelLayout::Rgba, buf),
        png::ColorType::GrayscaleAlpha => {
            let rgba: Vec<u8> = buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            (ChannelLayout::Rgba, rgba)
        }
        other => {
            return Err(IoError::UnsupportedBitDepth(format!("{:?} after expansion", other)));
        }
    };

    Ok(PixelBuffer::from_data(info.width, info.height, layout, data)?)
}

/// Writes an image to a PNG file, keeping its channel layout.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), layout = %image.layout(), "png::write");

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let color_type = match image.layout() {
        ChannelLayout::Gray => png::ColorType::Grayscale,
        ChannelLayout::Rgb => png::ColorType::Rgb,
        ChannelLayout::Rgba => png::ColorType::Rgba,
    };

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}
