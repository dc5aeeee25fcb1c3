//! # pconv-ops
//!
//! Parallel integer convolution for 8-bit rasters.
//!
//! # Modules
//!
//! - [`kernel`] - Validated integer kernels and parsing
//! - [`preset`] - Named filters (kernel + offset)
//! - [`pad`] - Edge-replicated padding
//! - [`partition`] - Row ranges for workers
//! - [`convolve`](mod@convolve) - The engine
//!
//! # Example
//!
//! ```rust
//! use pconv_core::{ChannelLayout, PixelBuffer};
//! use pconv_ops::{convolve, Kernel};
//!
//! let img = PixelBuffer::new(64, 48, ChannelLayout::Rgba).unwrap();
//! let out = convolve(&img, &Kernel::sharpen(), 0, 4).unwrap();
//! assert_eq!(out.layout(), ChannelLayout::Rgba);
//! ```
//!
//! ## Sharpen
//!
//! ```rust,ignore
//! use pconv_ops::sharpen;
//!
//! let sharpened = sharpen(&image, threads)?;
//! ```
//!
//! ## Presets
//!
//! ```rust,ignore
//! use pconv_ops::{apply_preset, FilterPreset};
//!
//! let relief = apply_preset(&image, FilterPreset::Emboss, threads)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod convolve;
pub mod kernel;
pub mod pad;
pub mod partition;
pub mod preset;

pub use convolve::{apply_preset, convolve, sharpen};
pub use error::{OpsError, OpsResult};
pub use kernel::Kernel;
pub use pad::PaddedBuffer;
pub use partition::partition_rows;
pub use preset::FilterPreset;
