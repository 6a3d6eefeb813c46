//! Command-line interface for converting one image to colored glyph art

use crate::io::color::parse_hex_color;
use crate::io::configuration::{
    DEFAULT_BOX_SIZE, DEFAULT_COLOR_BINS, DEFAULT_EDGE_COLOR, DEFAULT_SEED,
    FONT_ASPECT_ROW_STRIDE,
};
use crate::io::error::{GlyphError, Result};
use crate::io::image::load_pixel_grid;
use crate::io::render::render_canvas;
use crate::io::segment::subtract_background;
use crate::pipeline::{Pipeline, PipelineOptions};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glyphgrid")]
#[command(
    author,
    version,
    about = "Convert a raster image into a grid of colored terminal glyphs"
)]
/// Command-line arguments for the converter
pub struct Cli {
    /// Input image; any format the image crate can decode
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Comma-separated stages to run in order: edge, brightness, color, color_bin
    #[arg(value_name = "ACTIONS")]
    pub actions: String,

    /// Block side length in pixels; one block becomes one character cell
    #[arg(short = 'd', long = "downscale", default_value_t = DEFAULT_BOX_SIZE)]
    pub boxsize: usize,

    /// Edge-kernel side length; defaults to the block size, bumped to the
    /// next odd value when the block size is even
    #[arg(short = 'k', long)]
    pub kernel_size: Option<usize>,

    /// Gradient magnitude needed to detect an edge; default is the kernel
    /// size squared
    #[arg(short = 't', long = "threshold-edges")]
    pub threshold_edges: Option<f64>,

    /// Number of color clusters for the color_bin stage
    #[arg(short = 'b', long, default_value_t = DEFAULT_COLOR_BINS)]
    pub color_bins: usize,

    /// Hex color for detected edges; run edge after color stages if the
    /// edges should stay visible
    #[arg(short = 'e', long, default_value = DEFAULT_EDGE_COLOR)]
    pub edge_color: String,

    /// Emit a black background escape before the art
    #[arg(long)]
    pub bg: bool,

    /// Subtract the image background (Otsu threshold) before converting
    #[arg(short = 's', long)]
    pub subtract_bg: bool,

    /// Keep every block row; recommended for square bitmap fonts
    #[arg(long)]
    pub dont_adjust_to_font: bool,

    /// Seed for clustered color reduction
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl Cli {
    /// Block-row stride derived from the font-aspect flag
    pub const fn row_stride(&self) -> usize {
        if self.dont_adjust_to_font {
            1
        } else {
            FONT_ASPECT_ROW_STRIDE
        }
    }

    /// Edge-kernel size, defaulting to the block size made odd
    pub const fn resolved_kernel_size(&self) -> usize {
        match self.kernel_size {
            Some(size) => size,
            None => {
                if self.boxsize % 2 == 1 {
                    self.boxsize
                } else {
                    self.boxsize + 1
                }
            }
        }
    }

    /// Stage names in caller order
    pub fn stages(&self) -> Vec<&str> {
        self.actions
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Assemble the pipeline options
    ///
    /// # Errors
    ///
    /// Returns an error if the edge color spec does not parse.
    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        Ok(PipelineOptions {
            boxsize: self.boxsize,
            row_stride: self.row_stride(),
            kernel_size: self.resolved_kernel_size(),
            edge_threshold: self.threshold_edges,
            edge_color: parse_hex_color(&self.edge_color)?,
            color_bins: self.color_bins,
            seed: self.seed,
        })
    }
}

/// Drives one conversion: load, preprocess, run the pipeline, print
pub struct ArtWriter {
    cli: Cli,
}

impl ArtWriter {
    /// Create a writer from parsed CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Convert the image and write the art to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded, the options are
    /// invalid, a selected stage fails, or the output cannot be written.
    pub fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        self.write_to(&mut stdout)
    }

    /// Convert the image and write the art to an arbitrary sink
    ///
    /// # Errors
    ///
    /// Same conditions as [`ArtWriter::run`]; a failed write or flush is
    /// reported as [`GlyphError::OutputWrite`].
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut pixels = load_pixel_grid(&self.cli.image)?;
        if self.cli.subtract_bg {
            subtract_background(&mut pixels);
        }

        let options = self.cli.pipeline_options()?;
        let canvas = Pipeline::new().run(pixels.view(), &options, &self.cli.stages())?;

        let background = self.cli.bg.then_some([0, 0, 0]);
        let text = render_canvas(&canvas, background);

        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|source| GlyphError::OutputWrite { source })
    }
}
