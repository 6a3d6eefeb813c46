//! CLI entry point for the image-to-glyph-grid converter

use clap::Parser;
use glyphgrid::io::cli::{ArtWriter, Cli};

fn main() -> glyphgrid::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let writer = ArtWriter::new(cli);
    writer.run()
}
