//! CLI command implementations

pub mod convolve;
pub mod filter;
pub mod info;
pub mod sharpen;

use crate::RunConfig;
use anyhow::{bail, Context, Result};
use pconv_core::PixelBuffer;
use pconv_io::Format;
use pconv_ops::OpsResult;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    pconv_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path; JPEG outputs use `quality`
pub fn save_image(path: &Path, image: &PixelBuffer, quality: u8) -> Result<()> {
    let written = match Format::from_extension(path) {
        Format::Jpeg => pconv_io::write_jpeg_with_quality(path, image, quality),
        _ => pconv_io::write(path, image),
    };
    written.with_context(|| format!("Failed to save: {}", path.display()))
}

/// Rejects output paths whose extension names no writable format.
pub fn output_format(path: &Path) -> Result<Format> {
    let format = Format::from_extension(path);
    if format == Format::Unknown {
        bail!(
            "Unsupported output format: {} (use .{} or .{})",
            path.display(),
            Format::Png.extension(),
            Format::Jpeg.extension()
        );
    }
    Ok(format)
}

/// Loads `input`, runs `filter` on it, saves to `output` and reports timing.
pub fn run_filter<F>(input: &Path, output: &Path, label: &str, config: &RunConfig, filter: F) -> Result<()>
where
    F: FnOnce(&PixelBuffer) -> OpsResult<PixelBuffer>,
{
    let format = output_format(output)?;
    let image = load_image(input)?;
    info!(
        input = %input.display(),
        width = image.width(),
        height = image.height(),
        layout = %image.layout(),
        "Loaded image"
    );

    let start = Instant::now();
    let result = filter(&image).with_context(|| format!("{} failed on {}", label, input.display()))?;
    let elapsed = start.elapsed();
    info!(
        filter = label,
        threads = config.threads,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Filter applied"
    );

    save_image(output, &result, config.quality)?;

    if !config.quiet {
        let alpha_note = if result.layout().has_alpha() && !format.supports_alpha() {
            ", alpha dropped"
        } else {
            ""
        };
        println!(
            "{} -> {}: {} {}x{} {} ({} threads, {:.2} ms{})",
            input.display(),
            output.display(),
            label,
            result.width(),
            result.height(),
            result.layout(),
            config.threads,
            elapsed.as_secs_f64() * 1000.0,
            alpha_note
        );
    }

    Ok(())
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
