//! Block partitioning and per-block projections
//!
//! A [`BlockGrid`] is a zero-copy view of the source pixel grid sliced into
//! non-overlapping `boxsize × boxsize` tiles. Trailing pixels that do not
//! fill a whole block are truncated. A row stride of 2 keeps only
//! even-indexed block rows, approximating the roughly 2:1 height-to-width
//! aspect of terminal glyphs.

use crate::io::error::{Result, invalid_dimension, invalid_parameter};
use ndarray::{Array2, Array3, ArrayView3, s};
use num_traits::ToPrimitive;

/// A pixel grid partitioned into fixed-size blocks
///
/// Borrows the caller's pixel data; all block access is by view. The grid
/// may be empty (zero rows or columns) when the image is smaller than one
/// block in either axis — consumers must handle that shape without panicking.
#[derive(Debug, Clone, Copy)]
pub struct BlockGrid<'a, A> {
    pixels: ArrayView3<'a, A>,
    boxsize: usize,
    row_stride: usize,
    rows: usize,
    cols: usize,
}

impl<'a, A: Copy> BlockGrid<'a, A> {
    /// Partition a `(height, width, channels)` pixel grid into blocks
    ///
    /// # Errors
    ///
    /// Returns an error if `boxsize` is zero or `row_stride` is not 1 or 2.
    /// An image smaller than one block yields an empty grid, not an error.
    pub fn partition(
        pixels: ArrayView3<'a, A>,
        boxsize: usize,
        row_stride: usize,
    ) -> Result<Self> {
        if boxsize < 1 {
            return Err(invalid_dimension(
                "boxsize",
                &boxsize,
                &"block side length must be at least 1",
            ));
        }
        if !(1..=2).contains(&row_stride) {
            return Err(invalid_parameter(
                "row_stride",
                &row_stride,
                &"row stride must be 1 or 2",
            ));
        }

        let (height, width, _) = pixels.dim();
        let block_rows = height / boxsize;
        let cols = width / boxsize;
        // Even-indexed block rows survive the stride, so round up
        let rows = block_rows.div_ceil(row_stride);

        Ok(Self {
            pixels,
            boxsize,
            row_stride,
            rows: if cols == 0 { 0 } else { rows },
            cols: if block_rows == 0 { 0 } else { cols },
        })
    }

    /// Number of block rows after the stride is applied
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of block columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Side length of one block in pixels
    pub const fn boxsize(&self) -> usize {
        self.boxsize
    }

    /// View of the pixels belonging to block `(row, col)`
    ///
    /// `row` is a post-stride index; the underlying pixel rows are offset by
    /// `row * row_stride` blocks.
    pub fn block(&self, row: usize, col: usize) -> ArrayView3<'a, A> {
        let top = row * self.row_stride * self.boxsize;
        let left = col * self.boxsize;
        // slice_move keeps the view tied to the source image, not to &self
        self.pixels
            .slice_move(s![top..top + self.boxsize, left..left + self.boxsize, ..])
    }
}

impl<A: Copy + ToPrimitive> BlockGrid<'_, A> {
    /// Per-block luminance: the mean of every channel of every pixel
    ///
    /// Shape equals the block grid shape. Used by both the brightness and
    /// edge classifiers as a monochrome projection of the image.
    pub fn luminance(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.rows, self.cols), |(i, j)| {
            let block = self.block(i, j);
            let count = block.len().max(1) as f64;
            let sum: f64 = block.iter().map(|v| v.to_f64().unwrap_or(0.0)).sum();
            sum / count
        })
    }

    /// Per-block per-channel mean color, shape `(rows, cols, channels)`
    pub fn mean_colors(&self) -> Array3<f64> {
        let channels = self.pixels.dim().2;
        Array3::from_shape_fn((self.rows, self.cols, channels), |(i, j, c)| {
            let block = self.block(i, j);
            let channel = block.slice(s![.., .., c]);
            let count = channel.len().max(1) as f64;
            let sum: f64 = channel.iter().map(|v| v.to_f64().unwrap_or(0.0)).sum();
            sum / count
        })
    }
}
