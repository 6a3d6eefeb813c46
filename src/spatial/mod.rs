//! Spatial partitioning of the source image
//!
//! This module slices a pixel grid into the fixed-size blocks that become
//! output character cells and derives the per-block projections (luminance,
//! mean color) consumed by the classifiers.

/// Block partitioning and per-block projections
pub mod blocks;

pub use blocks::BlockGrid;
