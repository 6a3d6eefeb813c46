//! Directional gradient kernel construction
//!
//! Builds the radially-weighted gradient kernel pair used for edge
//! detection. `Gx[i, j] = j / (i² + j²)` over offsets `i, j ∈ [-r, r]` with
//! a zero center, and `Gy` is its transpose. The weighting emphasizes
//! horizontal gradient response and decays with distance; it is not a
//! normalized Sobel kernel, so its scale only shifts magnitude-threshold
//! calibration, never the angle.

use crate::io::error::{Result, invalid_parameter};
use ndarray::Array2;

/// A gradient kernel pair of odd side length
#[derive(Debug, Clone)]
pub struct GradientKernel {
    gx: Array2<f64>,
    gy: Array2<f64>,
    size: usize,
}

impl GradientKernel {
    /// Build the kernel pair for an odd side length
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or even.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size.is_multiple_of(2) {
            return Err(invalid_parameter(
                "kernel_size",
                &size,
                &"kernel side length must be odd",
            ));
        }

        let radius = (size / 2) as isize;
        let gx = Array2::from_shape_fn((size, size), |(row, col)| {
            let i = row as isize - radius;
            let j = col as isize - radius;
            if i == 0 && j == 0 {
                0.0
            } else {
                j as f64 / (i * i + j * j) as f64
            }
        });
        let gy = gx.t().to_owned();

        Ok(Self { gx, gy, size })
    }

    /// Kernel side length
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Half-width (radius) of the kernel
    pub const fn radius(&self) -> usize {
        self.size / 2
    }

    /// Horizontal-response kernel
    pub const fn gx(&self) -> &Array2<f64> {
        &self.gx
    }

    /// Vertical-response kernel (transpose of `gx`)
    pub const fn gy(&self) -> &Array2<f64> {
        &self.gy
    }

    /// Recommended magnitude threshold when the caller supplies none
    ///
    /// `size²` is a tuning constant calibrated against the unnormalized
    /// kernel scale, not a derived invariant.
    pub const fn default_threshold(&self) -> f64 {
        (self.size * self.size) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_or_zero_sizes_are_rejected() {
        assert!(GradientKernel::new(0).is_err());
        assert!(GradientKernel::new(4).is_err());
        assert!(GradientKernel::new(3).is_ok());
    }

    #[test]
    fn test_three_by_three_weights() {
        let kernel = GradientKernel::new(3).unwrap_or_else(|e| unreachable!("kernel: {e}"));
        let gx = kernel.gx();

        // Center row: -1/1, 0, 1/1
        assert!((gx[(1, 0)] + 1.0).abs() < 1e-12);
        assert!(gx[(1, 1)].abs() < f64::EPSILON);
        assert!((gx[(1, 2)] - 1.0).abs() < 1e-12);
        // Corner: j / (i² + j²) = 1/2
        assert!((gx[(0, 2)] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_gy_is_transpose_and_rows_sum_to_zero() {
        let kernel = GradientKernel::new(5).unwrap_or_else(|e| unreachable!("kernel: {e}"));
        for ((i, j), &value) in kernel.gx().indexed_iter() {
            assert!((value - kernel.gy()[(j, i)]).abs() < 1e-12);
        }
        // Odd symmetry in j makes every row cancel, so uniform input
        // produces exactly zero response
        for row in kernel.gx().rows() {
            assert!(row.sum().abs() < 1e-12);
        }
    }

    #[test]
    fn test_default_threshold_is_size_squared() {
        let kernel = GradientKernel::new(7).unwrap_or_else(|e| unreachable!("kernel: {e}"));
        assert!((kernel.default_threshold() - 49.0).abs() < f64::EPSILON);
    }
}
