//! Edge-replicated padding of the color channels.
//!
//! The padded buffer extends the image by `pad_x` columns and `pad_y`
//! rows on every side. Out-of-range taps take the value of the nearest
//! in-range pixel, row and column clamped independently:
//!
//! ```text
//! image        padded (pad = 1)
//!              a a b c c
//! a b c        a a b c c
//! d e f   ->   d d e f f
//!              d d e f f
//! ```
//!
//! Padding may exceed the image size (kernels larger than the image);
//! the clamp still resolves every tap to a border pixel.
//!
//! Alpha is never copied: an RGBA input yields a 3-channel padded buffer.

use crate::{OpsError, OpsResult};
use pconv_core::PixelBuffer;

/// Color channels of an image surrounded by replicated borders.
///
/// Built once per convolution and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PaddedBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
    pad_x: usize,
    pad_y: usize,
}

impl PaddedBuffer {
    /// Builds the padded copy of `image`'s color channels.
    ///
    /// # Errors
    ///
    /// [`OpsError::AllocationFailed`] if the padded size overflows or
    /// cannot be reserved.
    pub fn replicate(image: &PixelBuffer, pad_x: usize, pad_y: usize) -> OpsResult<Self> {
        let src_w = image.width() as usize;
        let src_h = image.height() as usize;
        let src_channels = image.channels();
        let channels = image.layout().color_channels();

        let overflow = || OpsError::AllocationFailed {
            buffer: "padded",
            requested: usize::MAX,
        };
        let width = pad_x
            .checked_mul(2)
            .and_then(|p| p.checked_add(src_w))
            .ok_or_else(overflow)?;
        let height = pad_y
            .checked_mul(2)
            .and_then(|p| p.checked_add(src_h))
            .ok_or_else(overflow)?;
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or_else(overflow)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| OpsError::AllocationFailed {
                buffer: "padded",
                requested: len,
            })?;

        let src = image.data();
        for py in 0..height {
            let sy = py.saturating_sub(pad_y).min(src_h - 1);
            let src_row = &src[sy * src_w * src_channels..(sy + 1) * src_w * src_channels];
            for px in 0..width {
                let sx = px.saturating_sub(pad_x).min(src_w - 1);
                let idx = sx * src_channels;
                data.extend_from_slice(&src_row[idx..idx + channels]);
            }
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
            pad_x,
            pad_y,
        })
    }

    /// Padded width (`image width + 2 * pad_x`).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Padded height (`image height + 2 * pad_y`).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Padding as `(pad_x, pad_y)`.
    #[inline]
    pub fn padding(&self) -> (usize, usize) {
        (self.pad_x, self.pad_y)
    }

    /// Samples of padded row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.channels;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Sample at padded coordinates `(x, y)`, channel `c`.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[(y * self.width + x) * self.channels + c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pconv_core::ChannelLayout;

    fn gray_3x3() -> PixelBuffer {
        PixelBuffer::from_data(3, 3, ChannelLayout::Gray, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap()
    }

    #[test]
    fn test_replicate_pad_one() {
        let padded = PaddedBuffer::replicate(&gray_3x3(), 1, 1).unwrap();
        assert_eq!((padded.width(), padded.height()), (5, 5));
        assert_eq!(padded.row(0), &[1, 1, 2, 3, 3]);
        assert_eq!(padded.row(1), &[1, 1, 2, 3, 3]);
        assert_eq!(padded.row(2), &[4, 4, 5, 6, 6]);
        assert_eq!(padded.row(4), &[7, 7, 8, 9, 9]);
    }

    #[test]
    fn test_padding_larger_than_image() {
        let padded = PaddedBuffer::replicate(&gray_3x3(), 4, 4).unwrap();
        assert_eq!((padded.width(), padded.height()), (11, 11));
        // Every outer corner tap is the matching image corner
        assert_eq!(padded.sample(0, 0, 0), 1);
        assert_eq!(padded.sample(10, 0, 0), 3);
        assert_eq!(padded.sample(0, 10, 0), 7);
        assert_eq!(padded.sample(10, 10, 0), 9);
        // Interior is untouched
        assert_eq!(padded.sample(5, 5, 0), 5);
    }

    #[test]
    fn test_rectangular_padding() {
        let padded = PaddedBuffer::replicate(&gray_3x3(), 2, 0).unwrap();
        assert_eq!((padded.width(), padded.height()), (7, 3));
        assert_eq!(padded.row(1), &[4, 4, 4, 5, 6, 6, 6]);
        assert_eq!(padded.padding(), (2, 0));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let img = PixelBuffer::from_data(
            2,
            1,
            ChannelLayout::Rgba,
            vec![10, 20, 30, 99, 40, 50, 60, 77],
        )
        .unwrap();
        let padded = PaddedBuffer::replicate(&img, 1, 0).unwrap();
        assert_eq!(padded.channels(), 3);
        assert_eq!(padded.row(0), &[10, 20, 30, 10, 20, 30, 40, 50, 60, 40, 50, 60]);
    }

    #[test]
    fn test_single_pixel() {
        let img = PixelBuffer::from_data(1, 1, ChannelLayout::Rgb, vec![1, 2, 3]).unwrap();
        let padded = PaddedBuffer::replicate(&img, 1, 1).unwrap();
        assert!(padded.row(2).chunks(3).all(|px| px == [1, 2, 3]));
    }
}
