//! Edge detection and orientation bucketing
//!
//! Convolves the per-block luminance grid with the gradient kernel pair and
//! buckets the gradient direction into one of four orientation symbols.
//! Out-of-range neighbors clamp to the nearest grid edge; combined with the
//! zero-sum kernel rows this keeps uniform regions at an exactly zero
//! response.

use crate::classify::kernel::GradientKernel;
use crate::classify::symbol::{Orientation, Symbol};
use crate::pipeline::canvas::Cell;
use ndarray::Array2;

/// Gradient direction and strength at one block position
///
/// The angle is meaningless when the magnitude is zero; callers gate on
/// magnitude before trusting it.
#[derive(Debug, Clone, Copy)]
pub struct GradientSample {
    /// Gradient direction in radians, from `atan2(gy, gx)`
    pub angle: f64,
    /// Gradient strength, `√(gx² + gy²)`
    pub magnitude: f64,
}

/// Bucket a gradient direction into an orientation symbol
///
/// Classifies `|angle/π|` into four bands. The band edges follow the
/// half-open convention of the reference shader: values on a boundary fall
/// into the lower band.
pub fn classify_angle(angle: f64) -> Orientation {
    let normalized = angle / std::f64::consts::PI;
    let magnitude_band = normalized.abs();

    if magnitude_band <= 0.1 || magnitude_band > 0.9 {
        Orientation::Vertical
    } else if magnitude_band > 0.4 && magnitude_band <= 0.6 {
        Orientation::Horizontal
    } else if magnitude_band <= 0.4 {
        if angle > 0.0 {
            Orientation::Rising
        } else {
            Orientation::Falling
        }
    } else if angle > 0.0 {
        Orientation::Falling
    } else {
        Orientation::Rising
    }
}

/// Classifies blocks as edge glyphs from the luminance gradient
#[derive(Debug, Clone)]
pub struct EdgeClassifier {
    kernel: GradientKernel,
    threshold: f64,
    edge_color: [u8; 3],
}

impl EdgeClassifier {
    /// Create a classifier from a kernel, an optional magnitude threshold,
    /// and the flat color painted on detected edges
    ///
    /// A missing threshold falls back to the kernel's recommended default.
    pub fn new(kernel: GradientKernel, threshold: Option<f64>, edge_color: [u8; 3]) -> Self {
        let threshold = threshold.unwrap_or_else(|| kernel.default_threshold());
        Self {
            kernel,
            threshold,
            edge_color,
        }
    }

    /// The effective magnitude threshold
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Gradient sample at one block position
    ///
    /// Sums the kernel over the `k×k` neighborhood of block luminances,
    /// clamping neighbor coordinates to the grid bounds. An empty grid has
    /// no neighbors to clamp to and yields a zero sample.
    pub fn gradient_at(&self, luminance: &Array2<f64>, row: usize, col: usize) -> GradientSample {
        let (rows, cols) = luminance.dim();
        if rows == 0 || cols == 0 {
            return GradientSample {
                angle: 0.0,
                magnitude: 0.0,
            };
        }
        let radius = self.kernel.radius() as isize;

        let mut gx = 0.0;
        let mut gy = 0.0;
        for di in -radius..=radius {
            for dj in -radius..=radius {
                let ni = (row as isize + di).clamp(0, rows as isize - 1) as usize;
                let nj = (col as isize + dj).clamp(0, cols as isize - 1) as usize;
                let value = luminance.get((ni, nj)).copied().unwrap_or(0.0);
                let ki = (di + radius) as usize;
                let kj = (dj + radius) as usize;
                gx += value * self.kernel.gx().get((ki, kj)).copied().unwrap_or(0.0);
                gy += value * self.kernel.gy().get((ki, kj)).copied().unwrap_or(0.0);
            }
        }

        GradientSample {
            angle: gy.atan2(gx),
            magnitude: gx.hypot(gy),
        }
    }

    /// Classify every block of a luminance grid
    ///
    /// Cells whose gradient magnitude does not exceed the threshold carry
    /// the empty symbol; all cells carry the flat edge color so the merge
    /// step can treat the output uniformly.
    pub fn classify(&self, luminance: &Array2<f64>) -> Array2<Cell> {
        Array2::from_shape_fn(luminance.dim(), |(row, col)| {
            let sample = self.gradient_at(luminance, row, col);
            let symbol = if sample.magnitude > self.threshold {
                Symbol::Edge(classify_angle(sample.angle))
            } else {
                Symbol::Empty
            };
            Cell {
                symbol,
                color: self.edge_color,
            }
        })
    }
}
