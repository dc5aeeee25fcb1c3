//! Image info command.
//!
//! Prints format, resolution, channel layout and file size of each input.

use crate::InfoArgs;
use anyhow::{Context, Result};
use pconv_io::Format;
use std::fs;

/// Runs the info command.
pub fn run(args: InfoArgs) -> Result<()> {
    for (index, path) in args.input.iter().enumerate() {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Cannot stat: {}", path.display()))?
            .len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path)?;

        if index > 0 {
            println!();
        }
        println!("{}", path.display());
        println!("  Format:     {:?}", format);
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Channels:   {} ({})", image.channels(), image.layout());
        println!("  Alpha:      {}", if image.layout().has_alpha() { "yes" } else { "no" });
        println!("  Pixels:     {}", image.pixel_count());
        println!("  File size:  {}", super::format_size(file_size));
    }

    Ok(())
}
