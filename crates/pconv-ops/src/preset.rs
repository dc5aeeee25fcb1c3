//! Named filters: a kernel paired with its additive offset.

use crate::{Kernel, OpsError};
use std::fmt;
use std::str::FromStr;

/// Built-in filters selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterPreset {
    /// [`Kernel::sharpen`], offset 0.
    #[default]
    Sharpen,
    /// [`Kernel::edge_detect`], offset 0.
    EdgeDetect,
    /// [`Kernel::emboss`], offset 128.
    Emboss,
    /// 3x3 identity, offset 0.
    Identity,
}

impl FilterPreset {
    /// All presets, in display order.
    pub const ALL: [FilterPreset; 4] = [
        FilterPreset::Sharpen,
        FilterPreset::EdgeDetect,
        FilterPreset::Emboss,
        FilterPreset::Identity,
    ];

    /// Preset name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sharpen => "sharpen",
            Self::EdgeDetect => "edge",
            Self::Emboss => "emboss",
            Self::Identity => "identity",
        }
    }

    /// Kernel applied by this preset.
    pub fn kernel(self) -> Kernel {
        match self {
            Self::Sharpen => Kernel::sharpen(),
            Self::EdgeDetect => Kernel::edge_detect(),
            Self::Emboss => Kernel::emboss(),
            Self::Identity => Kernel::sharpen_amount(0),
        }
    }

    /// Constant added to every accumulated sample.
    pub const fn offset(self) -> i32 {
        match self {
            Self::Emboss => 128,
            _ => 0,
        }
    }
}

impl FromStr for FilterPreset {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharpen" => Ok(Self::Sharpen),
            "edge" | "edges" | "edge-detect" | "laplacian" => Ok(Self::EdgeDetect),
            "emboss" => Ok(Self::Emboss),
            "identity" | "none" => Ok(Self::Identity),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown filter '{}' (expected one of: {})",
                other,
                Self::ALL.map(Self::name).join(", ")
            ))),
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
