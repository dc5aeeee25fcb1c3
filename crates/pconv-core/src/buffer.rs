//! Owned 8-bit raster buffer.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, channels
//! interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! There is no row padding: the stride of a row is always
//! `width * channels` bytes.

use crate::{ChannelLayout, Error, Result};

/// Owned 8-bit raster with a [`ChannelLayout`].
///
/// Invariants upheld by every constructor:
/// - `width > 0` and `height > 0`
/// - `data.len() == width * height * layout.channels()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    layout: ChannelLayout,
}

/// Validates dimensions and returns the sample count.
fn sample_count(width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows usize"))
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for a zero width/height
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    ///
    /// # Example
    ///
    /// ```rust
    /// use pconv_core::{ChannelLayout, PixelBuffer};
    ///
    /// let img = PixelBuffer::new(640, 480, ChannelLayout::Rgb).unwrap();
    /// assert_eq!(img.data().len(), 640 * 480 * 3);
    /// ```
    pub fn new(width: u32, height: u32, layout: ChannelLayout) -> Result<Self> {
        let len = sample_count(width, height, layout.channels())?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
        data.resize(len, 0);
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Wraps existing interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length does not
    /// match `width * height * layout.channels()`.
    pub fn from_data(width: u32, height: u32, layout: ChannelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height, layout.channels())?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Wraps existing samples, inferring the layout from a channel count.
    ///
    /// ```rust
    /// use pconv_core::{ChannelLayout, PixelBuffer};
    ///
    /// let img = PixelBuffer::from_channels(2, 1, 1, vec![7, 9]).unwrap();
    /// assert_eq!(img.layout(), ChannelLayout::Gray);
    /// assert!(PixelBuffer::from_channels(1, 1, 2, vec![0, 0]).is_err());
    /// ```
    pub fn from_channels(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        let layout = ChannelLayout::from_channels(channels)?;
        Self::from_data(width, height, layout, data)
    }

    /// Reattaches an alpha plane to an RGB color buffer, producing RGBA.
    ///
    /// `alpha` must hold exactly `width * height` samples.
    pub fn from_color_and_alpha(color: PixelBuffer, alpha: &[u8]) -> Result<Self> {
        if color.layout != ChannelLayout::Rgb {
            return Err(Error::channel_mismatch(3, color.layout.channels()));
        }
        let pixels = color.pixel_count();
        if alpha.len() != pixels {
            return Err(Error::invalid_dimensions(
                color.width,
                color.height,
                format!("alpha plane has {} samples, expected {}", alpha.len(), pixels),
            ));
        }

        let len = pixels * 4;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
        for (rgb, &a) in color.data.chunks_exact(3).zip(alpha) {
            data.extend_from_slice(rgb);
            data.push(a);
        }

        Ok(Self {
            data,
            width: color.width,
            height: color.height,
            layout: ChannelLayout::Rgba,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Interleaved channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the raw samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<&[u8]> {
        let idx = self.index(x, y)?;
        Ok(&self.data[idx..idx + self.channels()])
    }

    /// Overwrites the pixel at `(x, y)`; `value` must have one sample per channel.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> Result<()> {
        if value.len() != self.channels() {
            return Err(Error::channel_mismatch(self.channels(), value.len()));
        }
        let idx = self.index(x, y)?;
        let channels = self.channels();
        self.data[idx..idx + channels].copy_from_slice(value);
        Ok(())
    }

    /// Copies the alpha channel out as a `width * height` plane.
    ///
    /// Returns `None` for layouts without alpha.
    pub fn alpha_plane(&self) -> Option<Vec<u8>> {
        if !self.layout.has_alpha() {
            return None;
        }
        Some(self.data.chunks_exact(4).map(|px| px[3]).collect())
    }

    /// Splits an RGBA buffer into its RGB color buffer and alpha plane.
    ///
    /// Gray and RGB buffers are returned unchanged with no alpha.
    pub fn split_alpha(&self) -> Result<(PixelBuffer, Option<Vec<u8>>)> {
        let Some(alpha) = self.alpha_plane() else {
            return Ok((self.clone(), None));
        };
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let color = Self::from_data(self.width, self.height, ChannelLayout::Rgb, rgb)?;
        Ok((color, Some(alpha)))
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * self.channels())
    }
}
