//! Conversion constants and runtime configuration defaults

/// Default side length of one pixel block (one output character cell)
pub const DEFAULT_BOX_SIZE: usize = 7;

/// Block-row stride that compensates for roughly 2:1 terminal glyph aspect
pub const FONT_ASPECT_ROW_STRIDE: usize = 2;

/// Luminance divisor mapping the 0..=255 range onto ten brightness levels
pub const BRIGHTNESS_DIVISOR: f64 = 28.0;

/// Highest brightness level produced by the brightness classifier
pub const MAX_BRIGHTNESS_LEVEL: u8 = 9;

/// Default number of color clusters for palette reduction
pub const DEFAULT_COLOR_BINS: usize = 8;

/// Default color assigned to detected edge glyphs
pub const DEFAULT_EDGE_COLOR: &str = "#000000";

/// Maximum refinement iterations per k-means restart
pub const KMEANS_MAX_ITERATIONS: usize = 10;

/// Center-movement threshold below which a k-means restart stops early
pub const KMEANS_EPSILON: f64 = 1.0;

/// Number of independent random-center restarts; the lowest-cost run wins
pub const KMEANS_RESTARTS: usize = 10;

/// Fixed seed for reproducible clustering
pub const DEFAULT_SEED: u64 = 42;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed source image dimension in pixels
pub const MAX_GRID_DIMENSION: usize = 10_000;
