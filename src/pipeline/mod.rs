//! Canvas accumulation and pipeline orchestration
//!
//! The canvas is a grid of (symbol, color) cells that the selected
//! classifier stages overwrite in caller order, each through its own merge
//! descriptor. The orchestrator materializes the block grid and its
//! projections once, then runs the stages built by the registry.

/// The canvas of cells and the per-stage merge descriptors
pub mod canvas;
/// Pipeline options and the run orchestrator
pub mod orchestrator;
/// The stage trait, built-in stages, and the stage registry
pub mod stage;

pub use canvas::{Canvas, Cell, FieldPolicy, MergeDescriptor};
pub use orchestrator::{Pipeline, PipelineOptions};
pub use stage::{FrameContext, Stage, StageRegistry};
