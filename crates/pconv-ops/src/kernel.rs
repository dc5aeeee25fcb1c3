//! Integer convolution kernels.
//!
//! A [`Kernel`] is a row-major grid of signed `i32` weights with odd,
//! positive dimensions so that a center tap always exists. Kernels are
//! validated on construction and immutable afterwards, so the engine
//! never sees a malformed one.
//!
//! # Kernels
//!
//! - [`Kernel::identity`] - Reproduces the input
//! - [`Kernel::sharpen`] - The fixed 3x3 sharpen kernel
//! - [`Kernel::sharpen_amount`] - Sharpen with adjustable strength
//! - [`Kernel::edge_detect`] - Laplacian edges
//! - [`Kernel::emboss`] - Directional relief
//!
//! # Example
//!
//! ```rust
//! use pconv_ops::Kernel;
//!
//! let k: Kernel = "0,-1,0; -1,5,-1; 0,-1,0".parse().unwrap();
//! assert_eq!(k, Kernel::sharpen());
//! assert_eq!(k.radius(), (1, 1));
//! ```

use crate::{OpsError, OpsResult};
use std::fmt;
use std::str::FromStr;

/// Largest magnitude of the additive offset (`|i32::MIN|`).
const MAX_OFFSET_MAGNITUDE: i64 = 1 << 31;

/// Convolution kernel with integer weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    data: Vec<i32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidKernel`] if a dimension is zero or even, if
    /// `data.len() != width * height`, or if the worst-case accumulation
    /// over 8-bit samples could overflow `i64`.
    pub fn new(data: Vec<i32>, width: usize, height: usize) -> OpsResult<Self> {
        if check_shape(width, height)? != data.len() {
            return Err(OpsError::InvalidKernel(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }

        let bound = data
            .iter()
            .try_fold(0i64, |acc, &w| acc.checked_add(i64::from(w).abs()))
            .and_then(|sum| sum.checked_mul(i64::from(u8::MAX)))
            .and_then(|sum| sum.checked_add(MAX_OFFSET_MAGNITUDE));
        if bound.is_none() {
            return Err(OpsError::InvalidKernel(
                "kernel weights can overflow the accumulator".into(),
            ));
        }

        Ok(Self { data, width, height })
    }

    /// Creates a kernel from equally long rows.
    ///
    /// ```rust
    /// use pconv_ops::Kernel;
    ///
    /// let k = Kernel::from_rows(&[[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
    /// assert_eq!(k, Kernel::identity(3).unwrap());
    /// ```
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> OpsResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(bad) = rows.iter().position(|r| r.as_ref().len() != width) {
            return Err(OpsError::InvalidKernel(format!(
                "row {} has {} weights, expected {}",
                bad,
                rows[bad].as_ref().len(),
                width
            )));
        }
        let data = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::new(data, width, height)
    }

    /// Square kernel with a single 1 at the center.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidKernel`] for a zero, even or overflowing `size`
    /// (checked before the weights are allocated), and
    /// [`OpsError::AllocationFailed`] if the weights cannot be reserved.
    pub fn identity(size: usize) -> OpsResult<Self> {
        let len = check_shape(size, size)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| OpsError::AllocationFailed {
                buffer: "kernel",
                requested: len,
            })?;
        data.resize(len, 0);
        data[len / 2] = 1;
        Self::new(data, size, size)
    }

    /// The fixed sharpen kernel:
    ///
    /// ```text
    ///  0 -1  0
    /// -1  5 -1
    ///  0 -1  0
    /// ```
    pub fn sharpen() -> Self {
        Self::sharpen_amount(1)
    }

    /// Sharpen with strength `amount`: center `1 + 4a`, edges `-a`.
    ///
    /// `amount = 0` is the identity; weights always sum to 1, so flat
    /// regions keep their value.
    pub fn sharpen_amount(amount: u8) -> Self {
        let a = i32::from(amount);
        let center = 1 + 4 * a;
        Self {
            data: vec![
                0, -a, 0,
                -a, center, -a,
                0, -a, 0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Laplacian edge detection kernel.
    pub fn edge_detect() -> Self {
        Self {
            data: vec![
                0, -1, 0,
                -1, 4, -1,
                0, -1, 0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Emboss kernel (pair with an offset of 128 for mid-gray relief).
    pub fn emboss() -> Self {
        Self {
            data: vec![
                -2, -1, 0,
                -1, 1, 1,
                0, 1, 2,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Kernel width (columns, `kW`).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Kernel height (rows, `kH`).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major weights.
    #[inline]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Weight at kernel row `ki`, column `kj`.
    #[inline]
    pub fn weight(&self, ki: usize, kj: usize) -> i32 {
        self.data[ki * self.width + kj]
    }

    /// Weights of kernel row `ki`.
    #[inline]
    pub fn row(&self, ki: usize) -> &[i32] {
        &self.data[ki * self.width..(ki + 1) * self.width]
    }

    /// Returns the kernel radius (half-size) as `(x, y)`.
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> i64 {
        self.data.iter().map(|&w| i64::from(w)).sum()
    }
}

/// Validates kernel dimensions and returns the weight count.
fn check_shape(width: usize, height: usize) -> OpsResult<usize> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidKernel(format!(
            "kernel dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if width % 2 == 0 || height % 2 == 0 {
        return Err(OpsError::InvalidKernel(format!(
            "kernel dimensions must be odd, got {}x{}",
            width, height
        )));
    }
    width.checked_mul(height).ok_or_else(|| {
        OpsError::InvalidKernel(format!("kernel {}x{} is too large", width, height))
    })
}

impl FromStr for Kernel {
    type Err = OpsError;

    /// Parses rows separated by `;` or newlines, weights separated by
    /// commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(|c| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .map(|row| {
                row.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|tok| !tok.is_empty())
                    .map(|tok| {
                        tok.parse::<i32>().map_err(|e| {
                            OpsError::InvalidKernel(format!("bad weight '{}': {}", tok, e))
                        })
                    })
                    .collect::<OpsResult<Vec<i32>>>()
            })
            .collect::<OpsResult<Vec<_>>>()?;

        if rows.is_empty() {
            return Err(OpsError::InvalidKernel("empty kernel".into()));
        }
        Self::from_rows(&rows)
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ki in 0..self.height {
            if ki > 0 {
                f.write_str("; ")?;
            }
            let row: Vec<String> = self.row(ki).iter().map(i32::to_string).collect();
            f.write_str(&row.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_sharpen() {
        let k = Kernel::sharpen();
        assert_eq!(k.width(), 3);
        assert_eq!(k.height(), 3);
        assert_eq!(k.data(), &[0, -1, 0, -1, 5, -1, 0, -1, 0]);
        // Preserves flat regions
        assert_eq!(k.sum(), 1);
    }

    #[test]
    fn test_sharpen_amount() {
        assert_eq!(Kernel::sharpen_amount(0), Kernel::identity(3).unwrap());
        let k = Kernel::sharpen_amount(3);
        assert_eq!(k.weight(1, 1), 13);
        assert_eq!(k.weight(0, 1), -3);
        assert_eq!(k.sum(), 1);
    }

    #[test]
    fn test_identity_sizes() {
        let k = Kernel::identity(5).unwrap();
        assert_eq!(k.weight(2, 2), 1);
        assert_eq!(k.sum(), 1);
        assert!(Kernel::identity(4).is_err());
        assert!(Kernel::identity(0).is_err());
        // Rejected on shape alone, nothing is allocated
        assert!(Kernel::identity(usize::MAX - 1).unwrap_err().is_configuration_error());
        let err = Kernel::identity(usize::MAX).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_even_dimensions_rejected() {
        let err = Kernel::new(vec![1; 6], 2, 3).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("odd"));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Kernel::new(vec![], 0, 3).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_data_size_mismatch() {
        assert!(Kernel::new(vec![1; 8], 3, 3).is_err());
    }

    #[test]
    fn test_rectangular_kernel() {
        let k = Kernel::new(vec![1, 2, 3, 4, 5], 5, 1).unwrap();
        assert_eq!(k.radius(), (2, 0));
        assert_eq!(k.row(0), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_extreme_weights_fit_accumulator() {
        // 25 * 2^31 * 255 still fits i64
        let k = Kernel::new(vec![i32::MIN; 25], 5, 5).unwrap();
        assert_eq!(k.sum(), 25 * i64::from(i32::MIN));
    }

    #[test]
    fn test_parse() {
        let k: Kernel = "1 2 3\n4 5 6\n7 8 9".parse().unwrap();
        assert_eq!(k.weight(2, 0), 7);

        let k: Kernel = "-1,-1,-1;-1,8,-1;-1,-1,-1;".parse().unwrap();
        assert_eq!(k.sum(), 0);

        assert!("".parse::<Kernel>().is_err());
        assert!("1,2;3".parse::<Kernel>().is_err());
        assert!("1,x,1".parse::<Kernel>().is_err());
        assert!("1,1".parse::<Kernel>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let k = Kernel::emboss();
        assert_eq!(k.to_string(), "-2,-1,0; -1,1,1; 0,1,2");
        assert_eq!(k.to_string().parse::<Kernel>().unwrap(), k);
    }
}
