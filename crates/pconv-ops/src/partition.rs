//! Row partitioning for parallel workers.
//!
//! Rows `[0, height)` are split into `T = min(threads, height)`
//! contiguous, non-overlapping chunks of `height / T` rows. The last
//! chunk absorbs the remainder, so it can be up to `T - 1` rows longer
//! than the others.
//!
//! ```text
//! height = 10, threads = 4
//! [0..2) [2..4) [4..6) [6..10)
//! ```

use std::ops::Range;

/// Splits `height` rows into at most `threads` contiguous ranges.
///
/// Never yields more ranges than rows and never yields an empty range.
/// `threads == 0` is treated as 1; `height == 0` yields no ranges.
///
/// # Example
///
/// ```rust
/// use pconv_ops::partition_rows;
///
/// assert_eq!(partition_rows(10, 4), vec![0..2, 2..4, 4..6, 6..10]);
/// assert_eq!(partition_rows(3, 8), vec![0..1, 1..2, 2..3]);
/// ```
pub fn partition_rows(height: usize, threads: usize) -> Vec<Range<usize>> {
    if height == 0 {
        return Vec::new();
    }
    let count = threads.clamp(1, height);
    let rows_per_chunk = height / count;

    let mut start = 0;
    (0..count)
        .map(|t| {
            let end = if t == count - 1 { height } else { start + rows_per_chunk };
            let range = start..end;
            start = end;
            range
        })
        .collect()
}
