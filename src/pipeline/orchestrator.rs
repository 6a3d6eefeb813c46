//! Pipeline options and the run orchestrator
//!
//! One run partitions the image, materializes the per-block projections,
//! then executes the caller-ordered stages and merges each one's output
//! into the canvas through that stage's descriptor. Unrecognized stage
//! names are logged and skipped; the pipeline continues.

use crate::io::configuration::{
    DEFAULT_BOX_SIZE, DEFAULT_COLOR_BINS, DEFAULT_SEED, FONT_ASPECT_ROW_STRIDE,
};
use crate::io::error::Result;
use crate::pipeline::canvas::Canvas;
use crate::pipeline::stage::{FrameContext, StageRegistry};
use crate::spatial::BlockGrid;
use ndarray::ArrayView3;

/// Configuration shared by all stages of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Side length of one pixel block
    pub boxsize: usize,
    /// Block-row stride, 1 or 2
    pub row_stride: usize,
    /// Side length of the edge-detection kernel, odd
    pub kernel_size: usize,
    /// Gradient magnitude needed to detect an edge; `None` uses the
    /// kernel's recommended default of size squared
    pub edge_threshold: Option<f64>,
    /// Flat color painted on detected edge glyphs
    pub edge_color: [u8; 3],
    /// Palette size for clustered color reduction
    pub color_bins: usize,
    /// Seed for the clustering restarts
    pub seed: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            boxsize: DEFAULT_BOX_SIZE,
            row_stride: FONT_ASPECT_ROW_STRIDE,
            kernel_size: DEFAULT_BOX_SIZE,
            edge_threshold: None,
            edge_color: [0, 0, 0],
            color_bins: DEFAULT_COLOR_BINS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Runs the selected stages over an image and accumulates the canvas
pub struct Pipeline {
    registry: StageRegistry,
}

impl Pipeline {
    /// Pipeline with the built-in stage registry
    pub fn new() -> Self {
        Self {
            registry: StageRegistry::with_default_stages(),
        }
    }

    /// Pipeline with a caller-extended registry
    pub const fn with_registry(registry: StageRegistry) -> Self {
        Self { registry }
    }

    /// Execute the named stages, in order, over a pixel grid
    ///
    /// Stage names come from the registry (`edge`, `brightness`, `color`,
    /// `color_bin` by default). Unknown names are warned about and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if partitioning options are invalid or a known
    /// stage fails to build or compute.
    pub fn run<S: AsRef<str>>(
        &self,
        pixels: ArrayView3<'_, f64>,
        options: &PipelineOptions,
        stages: &[S],
    ) -> Result<Canvas> {
        let blocks = BlockGrid::partition(pixels, options.boxsize, options.row_stride)?;
        let frame = FrameContext::new(blocks);
        let mut canvas = Canvas::new(blocks.rows(), blocks.cols());

        for name in stages {
            let name = name.as_ref();
            let Some(stage) = self.registry.build(name, options) else {
                log::warn!("unknown pipeline stage '{name}', skipping");
                continue;
            };
            let stage = stage?;
            let update = stage.compute(&frame)?;
            canvas.apply(&update, stage.descriptor());
        }

        Ok(canvas)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_unknown_stage_is_skipped_without_error() {
        let pixels = Array3::from_elem((8, 8, 3), 100.0);
        let options = PipelineOptions {
            boxsize: 4,
            row_stride: 1,
            ..PipelineOptions::default()
        };
        let canvas = Pipeline::new()
            .run(pixels.view(), &options, &["no_such_stage", "brightness"])
            .unwrap_or_else(|e| unreachable!("run: {e}"));
        assert_eq!(canvas.dim(), (2, 2));
        assert!(!canvas.cells()[(0, 0)].symbol.is_empty());
    }

    #[test]
    fn test_empty_stage_list_returns_pristine_canvas() {
        let pixels = Array3::from_elem((8, 8, 3), 100.0);
        let options = PipelineOptions {
            boxsize: 4,
            row_stride: 1,
            ..PipelineOptions::default()
        };
        let canvas = Pipeline::new()
            .run(pixels.view(), &options, &[] as &[&str])
            .unwrap_or_else(|e| unreachable!("run: {e}"));
        assert!(canvas.cells().iter().all(|cell| cell.symbol.is_empty()));
        assert!(canvas.cells().iter().all(|cell| cell.color == [0, 0, 0]));
    }
}
