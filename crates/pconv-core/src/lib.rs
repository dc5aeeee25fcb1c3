//! # pconv-core
//!
//! Core raster types shared by the pconv crates.
//!
//! - [`PixelBuffer`] - Owned 8-bit row-major raster with 1, 3 or 4 channels
//! - [`ChannelLayout`] - Gray / RGB / RGBA tag resolved once per buffer
//! - [`Error`] - Validation errors for buffer construction and access
//!
//! ## Crate Structure
//!
//! ```text
//! pconv-core (this crate)
//!    ^
//!    |
//!    +-- pconv-ops (convolution engine)
//!    +-- pconv-io (PNG / JPEG)
//!    +-- pconv-cli
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pconv_core::{ChannelLayout, PixelBuffer};
//!
//! let mut img = PixelBuffer::new(4, 2, ChannelLayout::Rgba).unwrap();
//! img.set_pixel(1, 1, &[255, 0, 0, 128]).unwrap();
//!
//! let (color, alpha) = img.split_alpha().unwrap();
//! assert_eq!(color.layout(), ChannelLayout::Rgb);
//! assert_eq!(alpha.unwrap()[4 + 1], 128);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod layout;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use layout::ChannelLayout;
