//! Custom kernel command

use crate::{ConvolveArgs, RunConfig};
use anyhow::{Context, Result};
use pconv_ops::{convolve, Kernel};
use tracing::debug;

pub fn run(args: ConvolveArgs, config: &RunConfig) -> Result<()> {
    let kernel: Kernel = args
        .kernel
        .parse()
        .with_context(|| format!("Invalid kernel '{}'", args.kernel))?;
    debug!(kernel = %kernel, offset = args.offset, sum = kernel.sum(), "Parsed kernel");

    let label = format!("{}x{} kernel", kernel.width(), kernel.height());
    super::run_filter(&args.input, &args.output, &label, config, |image| {
        convolve(image, &kernel, args.offset, config.threads)
    })
}
