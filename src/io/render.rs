//! ANSI truecolor rendering of a finished canvas
//!
//! Every cell is emitted as a 24-bit foreground escape followed by its
//! glyph, one canvas row per output line. An optional background escape is
//! emitted once before the grid and the attributes are reset at the end.

use crate::pipeline::canvas::Canvas;
use std::fmt::Write as _;

/// Escape sequence resetting colors and attributes
pub const RESET: &str = "\x1b[0m";

/// 24-bit foreground color escape
pub fn foreground_escape(color: [u8; 3]) -> String {
    format!("\x1b[38;2;{};{};{}m", color[0], color[1], color[2])
}

/// 24-bit background color escape
pub fn background_escape(color: [u8; 3]) -> String {
    format!("\x1b[48;2;{};{};{}m", color[0], color[1], color[2])
}

/// Render a canvas into a printable string
///
/// `background` is emitted once, on its own line, before the glyph grid.
/// An empty canvas with no background renders to an empty string.
pub fn render_canvas(canvas: &Canvas, background: Option<[u8; 3]>) -> String {
    let mut out = String::new();

    if let Some(bg) = background {
        let _ = writeln!(out, "{}", background_escape(bg));
    }

    for row in canvas.cells().rows() {
        for cell in row {
            let _ = write!(
                out,
                "{}{}",
                foreground_escape(cell.color),
                cell.symbol.glyph()
            );
        }
        out.push('\n');
    }

    if !out.is_empty() {
        out.push_str(RESET);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::symbol::Symbol;
    use crate::pipeline::canvas::Cell;

    #[test]
    fn test_renders_foreground_escape_and_glyph_per_cell() {
        let mut canvas = Canvas::new(1, 1);
        canvas.cells_mut().map_inplace(|cell| {
            *cell = Cell {
                symbol: Symbol::brightness(9),
                color: [1, 2, 3],
            };
        });

        let text = render_canvas(&canvas, None);
        assert!(text.starts_with("\x1b[38;2;1;2;3m#"));
        assert!(text.ends_with(RESET));
    }

    #[test]
    fn test_background_is_emitted_once_before_grid() {
        let canvas = Canvas::new(1, 2);
        let text = render_canvas(&canvas, Some([0, 0, 0]));
        assert!(text.starts_with("\x1b[48;2;0;0;0m\n"));
        assert_eq!(text.matches("\x1b[48;2;").count(), 1);
    }

    #[test]
    fn test_empty_canvas_renders_to_empty_string() {
        let canvas = Canvas::new(0, 0);
        assert_eq!(render_canvas(&canvas, None), "");
    }
}
