//! Image format sniffing.
//!
//! The file signature wins; the extension is only consulted when the
//! header is unreadable or unrecognized.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Container formats pconv can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics.
    Png,
    /// JPEG / JFIF.
    Jpeg,
    /// Anything else.
    Unknown,
}

impl Format {
    /// Sniffs the header of `path`, falling back to its extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        match Self::from_magic_bytes(path) {
            Ok(Format::Unknown) | Err(_) => Ok(Self::from_extension(path)),
            Ok(found) => Ok(found),
        }
    }

    /// Maps `png`, `jpg`, `jpeg` and `jpe` (any case) to a format.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return Format::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "png" => Format::Png,
            "jpg" | "jpeg" | "jpe" => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Reads the first bytes of `path` and matches them against known signatures.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut header = Vec::with_capacity(PNG_SIGNATURE.len());
        File::open(path)?
            .take(PNG_SIGNATURE.len() as u64)
            .read_to_end(&mut header)?;
        Ok(Self::from_bytes(&header))
    }

    /// Matches a byte prefix against known signatures.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Format::Png
        } else if bytes.starts_with(&JPEG_SOI) {
            Format::Jpeg
        } else {
            Format::Unknown
        }
    }

    /// Canonical extension, empty for [`Format::Unknown`].
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Unknown => "",
        }
    }

    /// PNG keeps alpha; JPEG does not.
    pub fn supports_alpha(&self) -> bool {
        matches!(self, Format::Png)
    }
}
