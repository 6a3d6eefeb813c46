//! The stage trait, built-in stages, and the stage registry
//!
//! A stage turns the materialized frame projections into a canvas-shaped
//! update grid and declares, via its merge descriptor, which cell fields
//! that grid may overwrite. The registry maps stage names to builders so
//! new stages can be added without touching the orchestrator.

use crate::classify::brightness::classify_brightness;
use crate::classify::color::{ColorClusterer, average_colors};
use crate::classify::edge::EdgeClassifier;
use crate::classify::kernel::GradientKernel;
use crate::io::error::Result;
use crate::pipeline::canvas::{Cell, MergeDescriptor};
use crate::pipeline::orchestrator::PipelineOptions;
use crate::spatial::BlockGrid;
use ndarray::{Array2, Array3};
use std::collections::HashMap;

/// The per-frame projections every stage reads from
///
/// Materialized once per run, before any stage executes; stages never see
/// each other's partial output.
pub struct FrameContext<'a> {
    /// The partitioned source image
    pub blocks: BlockGrid<'a, f64>,
    /// Per-block luminance scalars
    pub luminance: Array2<f64>,
    /// Per-block per-channel mean colors
    pub mean_colors: Array3<f64>,
}

impl<'a> FrameContext<'a> {
    /// Materialize the projections of a block grid
    pub fn new(blocks: BlockGrid<'a, f64>) -> Self {
        let luminance = blocks.luminance();
        let mean_colors = blocks.mean_colors();
        Self {
            blocks,
            luminance,
            mean_colors,
        }
    }
}

/// One selectable transform of the block grid into canvas updates
pub trait Stage {
    /// Stage name as used in the caller's pipeline selection
    fn name(&self) -> &'static str;

    /// Which canvas fields this stage's merge may overwrite
    fn descriptor(&self) -> MergeDescriptor;

    /// Compute the full update grid for this stage
    ///
    /// # Errors
    ///
    /// Returns an error when the stage's configuration cannot be applied to
    /// this frame, such as clustering with too few distinct colors.
    fn compute(&self, frame: &FrameContext<'_>) -> Result<Array2<Cell>>;
}

/// Edge-orientation glyphs where the luminance gradient is strong
pub struct EdgeStage {
    classifier: EdgeClassifier,
}

impl Stage for EdgeStage {
    fn name(&self) -> &'static str {
        "edge"
    }

    fn descriptor(&self) -> MergeDescriptor {
        MergeDescriptor::EDGES_ONLY
    }

    fn compute(&self, frame: &FrameContext<'_>) -> Result<Array2<Cell>> {
        Ok(self.classifier.classify(&frame.luminance))
    }
}

/// Brightness-ramp glyphs from block luminance
pub struct BrightnessStage;

impl Stage for BrightnessStage {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn descriptor(&self) -> MergeDescriptor {
        MergeDescriptor::SYMBOL_EVERYWHERE
    }

    fn compute(&self, frame: &FrameContext<'_>) -> Result<Array2<Cell>> {
        Ok(classify_brightness(&frame.luminance))
    }
}

/// Direct per-block mean colors
pub struct AverageColorStage;

impl Stage for AverageColorStage {
    fn name(&self) -> &'static str {
        "color"
    }

    fn descriptor(&self) -> MergeDescriptor {
        MergeDescriptor::COLOR_EVERYWHERE
    }

    fn compute(&self, frame: &FrameContext<'_>) -> Result<Array2<Cell>> {
        Ok(average_colors(&frame.mean_colors))
    }
}

/// Block colors reduced to a clustered palette
pub struct ClusterColorStage {
    clusterer: ColorClusterer,
}

impl Stage for ClusterColorStage {
    fn name(&self) -> &'static str {
        "color_bin"
    }

    fn descriptor(&self) -> MergeDescriptor {
        MergeDescriptor::COLOR_EVERYWHERE
    }

    fn compute(&self, frame: &FrameContext<'_>) -> Result<Array2<Cell>> {
        self.clusterer.reduce(&frame.mean_colors)
    }
}

/// Builds one stage instance from the pipeline options
pub type StageBuilder = fn(&PipelineOptions) -> Result<Box<dyn Stage>>;

/// Name-to-builder map for the selectable stages
pub struct StageRegistry {
    builders: HashMap<&'static str, StageBuilder>,
}

impl StageRegistry {
    /// Registry containing the four built-in stages
    pub fn with_default_stages() -> Self {
        let mut registry = Self {
            builders: HashMap::new(),
        };
        registry.register("edge", build_edge_stage);
        registry.register("brightness", |_| Ok(Box::new(BrightnessStage)));
        registry.register("color", |_| Ok(Box::new(AverageColorStage)));
        registry.register("color_bin", build_cluster_stage);
        registry
    }

    /// Register or replace a stage builder under a name
    pub fn register(&mut self, name: &'static str, builder: StageBuilder) {
        self.builders.insert(name, builder);
    }

    /// Build the named stage, or `None` if the name is unknown
    ///
    /// # Errors
    ///
    /// Returns `Some(Err(..))` when the name is known but the options are
    /// invalid for that stage, such as an even edge-kernel size.
    pub fn build(&self, name: &str, options: &PipelineOptions) -> Option<Result<Box<dyn Stage>>> {
        self.builders.get(name).map(|builder| builder(options))
    }
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::with_default_stages()
    }
}

fn build_edge_stage(options: &PipelineOptions) -> Result<Box<dyn Stage>> {
    let kernel = GradientKernel::new(options.kernel_size)?;
    let classifier = EdgeClassifier::new(kernel, options.edge_threshold, options.edge_color);
    Ok(Box::new(EdgeStage { classifier }))
}

fn build_cluster_stage(options: &PipelineOptions) -> Result<Box<dyn Stage>> {
    let clusterer = ColorClusterer::new(options.color_bins, options.seed);
    Ok(Box::new(ClusterColorStage { clusterer }))
}
