//! Parallel 2D convolution engine.
//!
//! [`convolve`] applies an integer [`Kernel`] at every pixel of a
//! [`PixelBuffer`]:
//!
//! ```text
//! total = offset + Σ kernel[ki][kj] * padded[i + ki][j + kj][c]
//! out[i][j][c] = clamp(total, 0, 255)
//! ```
//!
//! # Pipeline
//!
//! 1. Validate the thread count
//! 2. Pad the color channels with edge replication ([`PaddedBuffer`])
//! 3. Split rows with [`partition_rows`] and the output buffer into one
//!    exclusive `&mut [u8]` per range
//! 4. Spawn one job per range on a fresh pool of `T` threads and join
//! 5. Reattach the untouched alpha plane for RGBA input
//!
//! Workers read only the immutable padded buffer and kernel and write
//! only their own slice, so the output is identical for every thread
//! count.
//!
//! # Example
//!
//! ```rust
//! use pconv_core::{ChannelLayout, PixelBuffer};
//! use pconv_ops::{convolve, Kernel};
//!
//! let img = PixelBuffer::from_data(3, 1, ChannelLayout::Gray, vec![10, 200, 10]).unwrap();
//! let out = convolve(&img, &Kernel::sharpen(), 0, 2).unwrap();
//! assert_eq!(out.data(), &[0, 255, 0]);
//! ```

use crate::{partition_rows, FilterPreset, Kernel, OpsError, OpsResult, PaddedBuffer};
use pconv_core::PixelBuffer;
use std::ops::Range;
use tracing::{debug, trace};

/// Convolves the color channels of `image` with `kernel` using `threads` workers.
///
/// Alpha of RGBA input is passed through unchanged. The result has the
/// same dimensions and layout as `image`.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] if `threads == 0` (nothing is allocated)
/// - [`OpsError::AllocationFailed`] if a working buffer cannot be reserved
/// - [`OpsError::ThreadPool`] if the worker threads cannot be spawned
/// - [`OpsError::WorkerFailed`] if any worker fails; no partial result is returned
pub fn convolve(
    image: &PixelBuffer,
    kernel: &Kernel,
    offset: i32,
    threads: usize,
) -> OpsResult<PixelBuffer> {
    trace!(
        width = image.width(),
        height = image.height(),
        layout = %image.layout(),
        kernel_w = kernel.width(),
        kernel_h = kernel.height(),
        offset,
        threads,
        "convolve"
    );

    if threads == 0 {
        return Err(OpsError::InvalidParameter("thread count must be > 0".into()));
    }

    let width = image.width() as usize;
    let height = image.height() as usize;
    let layout = image.layout();
    let channels = layout.color_channels();
    let row_len = width * channels;

    let (pad_x, pad_y) = kernel.radius();
    let padded = PaddedBuffer::replicate(image, pad_x, pad_y)?;

    let out_len = row_len * height;
    let mut output = Vec::new();
    output
        .try_reserve_exact(out_len)
        .map_err(|_| OpsError::AllocationFailed {
            buffer: "output",
            requested: out_len,
        })?;
    output.resize(out_len, 0u8);

    let ranges = partition_rows(height, threads);
    debug!(workers = ranges.len(), rows = height, "Partitioned rows");

    let jobs = split_rows(&mut output, &ranges, row_len);
    run_workers(&padded, kernel, offset, jobs)?;

    let color = PixelBuffer::from_data(image.width(), image.height(), layout.without_alpha(), output)?;
    match image.alpha_plane() {
        Some(alpha) => Ok(PixelBuffer::from_color_and_alpha(color, &alpha)?),
        None => Ok(color),
    }
}

/// Applies the fixed sharpen kernel ([`Kernel::sharpen`], offset 0).
///
/// ```rust
/// use pconv_core::{ChannelLayout, PixelBuffer};
/// use pconv_ops::sharpen;
///
/// let flat = PixelBuffer::from_data(2, 2, ChannelLayout::Gray, vec![90; 4]).unwrap();
/// assert_eq!(sharpen(&flat, 4).unwrap(), flat);
/// ```
pub fn sharpen(image: &PixelBuffer, threads: usize) -> OpsResult<PixelBuffer> {
    convolve(image, &Kernel::sharpen(), 0, threads)
}

/// Applies a named [`FilterPreset`] (its kernel and offset).
pub fn apply_preset(image: &PixelBuffer, preset: FilterPreset, threads: usize) -> OpsResult<PixelBuffer> {
    debug!(preset = %preset, "Applying preset");
    convolve(image, &preset.kernel(), preset.offset(), threads)
}

/// A row range and the output rows it owns.
type Job<'a> = (Range<usize>, &'a mut [u8]);

/// Hands out one disjoint output slice per row range.
fn split_rows<'a>(output: &'a mut [u8], ranges: &[Range<usize>], row_len: usize) -> Vec<Job<'a>> {
    let mut rest = output;
    let mut jobs = Vec::with_capacity(ranges.len());
    for rows in ranges {
        let (chunk, tail) = rest.split_at_mut(rows.len() * row_len);
        jobs.push((rows.clone(), chunk));
        rest = tail;
    }
    jobs
}

/// Runs every job on a fresh pool with one thread per job, then joins.
fn run_workers(padded: &PaddedBuffer, kernel: &Kernel, offset: i32, jobs: Vec<Job<'_>>) -> OpsResult<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.len())
        .thread_name(|index| format!("pconv-worker-{}", index))
        .build()
        .map_err(|e| OpsError::ThreadPool(e.to_string()))?;

    let mut results: Vec<OpsResult<()>> = jobs.iter().map(|_| Ok(())).collect();
    pool.scope(|s| {
        for ((rows, out), result) in jobs.into_iter().zip(results.iter_mut()) {
            s.spawn(move |_| {
                *result = convolve_rows(padded, kernel, offset, rows, out);
            });
        }
    });

    results.into_iter().collect()
}

/// Computes output rows `rows` into `out` (which holds exactly those rows).
fn convolve_rows(
    padded: &PaddedBuffer,
    kernel: &Kernel,
    offset: i32,
    rows: Range<usize>,
    out: &mut [u8],
) -> OpsResult<()> {
    trace!(start = rows.start, end = rows.end, "convolve_rows");

    let channels = padded.channels();
    let (pad_x, _) = padded.padding();
    let width = padded.width() - 2 * pad_x;
    let row_len = width * channels;

    if out.len() != rows.len() * row_len {
        return Err(OpsError::WorkerFailed {
            reason: format!("output slice holds {} samples, expected {}", out.len(), rows.len() * row_len),
            rows,
        });
    }

    let (kw, kh) = (kernel.width(), kernel.height());
    let bias = i64::from(offset);

    for (i, out_row) in rows.clone().zip(out.chunks_exact_mut(row_len)) {
        for j in 0..width {
            for c in 0..channels {
                let mut total = bias;
                for ki in 0..kh {
                    let src = padded.row(i + ki);
                    let weights = kernel.row(ki);
                    for kj in 0..kw {
                        let w = weights[kj];
                        if w != 0 {
                            total += i64::from(w) * i64::from(src[(j + kj) * channels + c]);
                        }
                    }
                }
                out_row[j * channels + c] = total.clamp(0, 255) as u8;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pconv_core::ChannelLayout;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> PixelBuffer {
        PixelBuffer::from_data(width, height, ChannelLayout::Gray, data).unwrap()
    }

    #[test]
    fn test_sharpen_corners_use_replicated_edges() {
        let img = gray(3, 3, vec![100, 20, 30, 40, 50, 60, 70, 80, 90]);
        let out = sharpen(&img, 1).unwrap();
        // (0,0): 5*100 - 100 (up, replicated) - 100 (left, replicated) - 20 - 40
        assert_eq!(out.pixel(0, 0).unwrap(), &[240]);
        // (2,2): 5*90 - 60 - 80 - 90 (right, replicated) - 90 (down, replicated)
        assert_eq!(out.pixel(2, 2).unwrap(), &[130]);
        // (1,1): 5*50 - 20 - 40 - 60 - 80
        assert_eq!(out.pixel(1, 1).unwrap(), &[50]);
    }

    #[test]
    fn test_offset_is_added_before_clamp() {
        let img = gray(2, 1, vec![100, 100]);
        let k = Kernel::identity(1).unwrap();
        assert_eq!(convolve(&img, &k, 30, 1).unwrap().data(), &[130, 130]);
        assert_eq!(convolve(&img, &k, 200, 1).unwrap().data(), &[255, 255]);
        assert_eq!(convolve(&img, &k, -150, 1).unwrap().data(), &[0, 0]);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let img = gray(1, 1, vec![0]);
        let err = convolve(&img, &Kernel::sharpen(), 0, 0).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_split_rows_disjoint() {
        let mut buf = vec![0u8; 10 * 4];
        let ranges = partition_rows(10, 3);
        let jobs = split_rows(&mut buf, &ranges, 4);
        let lens: Vec<usize> = jobs.iter().map(|(_, s)| s.len()).collect();
        assert_eq!(lens, vec![12, 12, 16]);
    }

    #[test]
    fn test_worker_rejects_mismatched_slice() {
        let img = gray(4, 4, vec![0; 16]);
        let padded = PaddedBuffer::replicate(&img, 1, 1).unwrap();
        let mut out = vec![0u8; 3];
        let err = convolve_rows(&padded, &Kernel::sharpen(), 0, 0..1, &mut out).unwrap_err();
        assert!(matches!(err, OpsError::WorkerFailed { ref rows, .. } if *rows == (0..1)));
        assert!(err.is_resource_error());
    }

    #[test]
    fn test_run_workers_fails_if_any_job_fails() {
        let img = gray(4, 4, vec![7; 16]);
        let padded = PaddedBuffer::replicate(&img, 1, 1).unwrap();
        let kernel = Kernel::sharpen();

        let mut good = vec![0u8; 2 * 4];
        let mut short = vec![0u8; 4 + 1];
        let jobs: Vec<Job<'_>> = vec![(0..2, &mut good[..]), (2..4, &mut short[..])];

        let err = run_workers(&padded, &kernel, 0, jobs).unwrap_err();
        assert!(matches!(err, OpsError::WorkerFailed { ref rows, .. } if *rows == (2..4)));
        // The healthy job still ran to completion
        assert_eq!(good, vec![7; 8]);
    }

    #[test]
    fn test_run_workers_all_ok() {
        let img = gray(3, 2, vec![1, 2, 3, 4, 5, 6]);
        let padded = PaddedBuffer::replicate(&img, 0, 0).unwrap();
        let mut out = vec![0u8; 6];
        let identity = Kernel::identity(1).unwrap();

        run_workers(&padded, &identity, 0, split_rows(&mut out, &[0..1, 1..2], 3)).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_apply_preset_emboss_flat_is_mid_gray() {
        // Emboss weights sum to 1, so a flat field maps to value + 128
        let img = gray(4, 4, vec![10; 16]);
        let out = apply_preset(&img, FilterPreset::Emboss, 2).unwrap();
        assert!(out.data().iter().all(|&v| v == 138));
    }

    #[test]
    fn test_edge_detect_flat_is_zero() {
        let img = PixelBuffer::from_data(3, 3, ChannelLayout::Rgb, vec![77; 27]).unwrap();
        let out = apply_preset(&img, FilterPreset::EdgeDetect, 3).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }
}
