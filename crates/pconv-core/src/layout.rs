//! Channel layouts supported by [`PixelBuffer`](crate::PixelBuffer).

use crate::{Error, Result};
use std::fmt;

/// Interleaved channel layout of an 8-bit raster.
///
/// | Layout | Channels | Color channels | Alpha |
/// |--------|----------|----------------|-------|
/// | `Gray` | 1 | 1 | no |
/// | `Rgb`  | 3 | 3 | no |
/// | `Rgba` | 4 | 3 | yes (last) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single luminance channel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ChannelLayout {
    /// Resolves a layout from an interleaved channel count.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pconv_core::ChannelLayout;
    ///
    /// assert_eq!(ChannelLayout::from_channels(4).unwrap(), ChannelLayout::Rgba);
    /// assert!(ChannelLayout::from_channels(2).is_err());
    /// ```
    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(Error::UnsupportedChannels(n)),
        }
    }

    /// Total interleaved channels per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Channels that carry color (alpha excluded).
    #[inline]
    pub const fn color_channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb | Self::Rgba => 3,
        }
    }

    /// Whether the last channel is alpha.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Layout of the color channels only.
    #[inline]
    pub const fn without_alpha(self) -> Self {
        match self {
            Self::Gray => Self::Gray,
            Self::Rgb | Self::Rgba => Self::Rgb,
        }
    }

    /// Short display name ("L", "RGB", "RGBA").
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gray => "L",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
