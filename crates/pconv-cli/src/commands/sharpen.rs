//! Sharpen command

use crate::{RunConfig, SharpenArgs};
use anyhow::Result;
use pconv_ops::{convolve, sharpen, Kernel};
use tracing::trace;

pub fn run(args: SharpenArgs, config: &RunConfig) -> Result<()> {
    trace!(amount = args.amount, "sharpen::run");

    super::run_filter(&args.input, &args.output, "sharpen", config, |image| {
        if args.amount == 1 {
            sharpen(image, config.threads)
        } else {
            convolve(image, &Kernel::sharpen_amount(args.amount), 0, config.threads)
        }
    })
}
