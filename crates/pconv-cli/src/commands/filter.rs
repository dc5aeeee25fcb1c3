//! Preset filter command

use crate::{FilterArgs, RunConfig};
use anyhow::{Context, Result};
use pconv_ops::{apply_preset, FilterPreset};

pub fn run(args: FilterArgs, config: &RunConfig) -> Result<()> {
    let preset: FilterPreset = args
        .preset
        .parse()
        .with_context(|| format!("Invalid preset '{}'", args.preset))?;

    super::run_filter(&args.input, &args.output, preset.name(), config, |image| {
        apply_preset(image, preset, config.threads)
    })
}
