//! Per-block classifiers mapping image features to symbols and colors
//!
//! This module contains the classification pipeline stages' algorithmic
//! cores:
//! - The closed symbol alphabet and its glyph table
//! - Directional gradient kernel construction
//! - Edge orientation classification
//! - Brightness quantization
//! - Color reduction by averaging and by k-means clustering

/// Brightness quantization of block luminance
pub mod brightness;
/// Color reduction by averaging and clustering
pub mod color;
/// Edge detection and orientation bucketing
pub mod edge;
/// Directional gradient kernel construction
pub mod kernel;
/// The closed symbol alphabet and glyph table
pub mod symbol;

pub use edge::EdgeClassifier;
pub use kernel::GradientKernel;
pub use symbol::{Orientation, Symbol};
