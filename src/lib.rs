//! Raster images to grids of colored terminal glyphs
//!
//! The system partitions an image into fixed-size pixel blocks, projects each
//! block to a luminance scalar and a mean color, classifies blocks by edge
//! orientation, brightness, and reduced color, and accumulates the selected
//! classifier outputs into a canvas of (symbol, color) cells ready for ANSI
//! rendering.

#![deny(unsafe_code)]

/// Block classifiers: symbols, gradient kernels, edges, brightness, color
pub mod classify;
/// Input/output operations, CLI, and error handling
pub mod io;
/// Canvas accumulation, stage registry, and pipeline orchestration
pub mod pipeline;
/// Block partitioning and per-block projections of the source image
pub mod spatial;

pub use io::error::{GlyphError, Result};
