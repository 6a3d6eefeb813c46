//! Input/output operations and error handling
//!
//! This module contains the outer shell around the core pipeline:
//! - Command-line interface and run orchestration
//! - Image decoding into pixel grids
//! - Hex color parsing
//! - Background segmentation preprocessing
//! - ANSI escape rendering of the finished canvas

/// Command-line interface and conversion driver
pub mod cli;
/// Hex color spec parsing
pub mod color;
/// Constants and runtime configuration defaults
pub mod configuration;
/// Error types for conversion operations
pub mod error;
/// Image decoding into pixel grids
pub mod image;
/// ANSI truecolor rendering of a finished canvas
pub mod render;
/// Otsu-threshold background segmentation
pub mod segment;
