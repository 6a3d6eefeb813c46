//! The canvas of (symbol, color) cells and per-stage merge descriptors
//!
//! Stages never see each other's partial output; each computes a full
//! canvas-shaped update grid and merges it in through an explicit
//! [`MergeDescriptor`] saying which cell fields it may touch and under what
//! per-cell condition. The asymmetry is deliberate: ordering `color` before
//! `edge` paints colors everywhere and then overlays edge glyphs only where
//! edges exist.

use crate::classify::symbol::Symbol;
use ndarray::{Array2, Zip};

/// One canvas position: a symbol tag and an RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Which glyph this cell renders
    pub symbol: Symbol,
    /// Foreground color of the glyph
    pub color: [u8; 3],
}

/// When a merge may write one cell field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// The stage never touches this field
    Never,
    /// The stage overwrites this field at every position
    Always,
    /// The stage overwrites only where its own output symbol is non-empty
    WhenMarked,
}

impl FieldPolicy {
    /// Whether a write applies given the update cell's marked state
    pub const fn applies(self, marked: bool) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::WhenMarked => marked,
        }
    }
}

/// Which cell fields one stage's merge may overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeDescriptor {
    /// Policy for the symbol field
    pub symbol: FieldPolicy,
    /// Policy for the color field
    pub color: FieldPolicy,
}

impl MergeDescriptor {
    /// Edge stages write symbol and color, but only at detected edges
    pub const EDGES_ONLY: Self = Self {
        symbol: FieldPolicy::WhenMarked,
        color: FieldPolicy::WhenMarked,
    };

    /// Brightness stages write every symbol and never touch color
    pub const SYMBOL_EVERYWHERE: Self = Self {
        symbol: FieldPolicy::Always,
        color: FieldPolicy::Never,
    };

    /// Color stages write every color and never touch symbols
    pub const COLOR_EVERYWHERE: Self = Self {
        symbol: FieldPolicy::Never,
        color: FieldPolicy::Always,
    };
}

/// The mutable accumulation grid handed to the renderer when the run ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    cells: Array2<Cell>,
}

impl Canvas {
    /// Create a canvas of empty, black cells
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), Cell::default()),
        }
    }

    /// Canvas shape as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Read-only view of the cells
    pub const fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Mutable access to the cells
    pub const fn cells_mut(&mut self) -> &mut Array2<Cell> {
        &mut self.cells
    }

    /// Merge a stage's update grid through its descriptor
    ///
    /// The update must be canvas-shaped. A mismatch asserts in debug builds;
    /// release builds skip the merge and leave the canvas untouched.
    pub fn apply(&mut self, update: &Array2<Cell>, descriptor: MergeDescriptor) {
        debug_assert_eq!(
            self.cells.dim(),
            update.dim(),
            "update grid shape differs from the canvas shape"
        );
        if self.cells.dim() != update.dim() {
            return;
        }
        Zip::from(&mut self.cells).and(update).for_each(|cell, new| {
            let marked = !new.symbol.is_empty();
            if descriptor.symbol.applies(marked) {
                cell.symbol = new.symbol;
            }
            if descriptor.color.applies(marked) {
                cell.color = new.color;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::symbol::Orientation;

    fn update_with(symbol: Symbol, color: [u8; 3]) -> Array2<Cell> {
        Array2::from_elem((1, 2), Cell { symbol, color })
    }

    #[test]
    fn test_edge_descriptor_skips_unmarked_cells() {
        let mut canvas = Canvas::new(1, 2);
        canvas.cells_mut()[(0, 0)] = Cell {
            symbol: Symbol::brightness(5),
            color: [9, 9, 9],
        };

        let mut update = update_with(Symbol::Empty, [1, 1, 1]);
        update[(0, 1)] = Cell {
            symbol: Symbol::Edge(Orientation::Vertical),
            color: [1, 1, 1],
        };
        canvas.apply(&update, MergeDescriptor::EDGES_ONLY);

        // Unmarked position keeps the prior stage's work entirely
        assert_eq!(canvas.cells()[(0, 0)].symbol, Symbol::brightness(5));
        assert_eq!(canvas.cells()[(0, 0)].color, [9, 9, 9]);
        // Marked position takes both fields
        assert_eq!(
            canvas.cells()[(0, 1)].symbol,
            Symbol::Edge(Orientation::Vertical)
        );
        assert_eq!(canvas.cells()[(0, 1)].color, [1, 1, 1]);
    }

    #[test]
    fn test_brightness_descriptor_writes_symbols_and_preserves_colors() {
        let mut canvas = Canvas::new(1, 2);
        canvas.cells_mut()[(0, 0)].color = [7, 8, 9];

        let update = update_with(Symbol::brightness(3), [0, 0, 0]);
        canvas.apply(&update, MergeDescriptor::SYMBOL_EVERYWHERE);

        assert_eq!(canvas.cells()[(0, 0)].symbol, Symbol::brightness(3));
        assert_eq!(canvas.cells()[(0, 0)].color, [7, 8, 9]);
        assert_eq!(canvas.cells()[(0, 1)].symbol, Symbol::brightness(3));
    }

    #[test]
    fn test_color_descriptor_writes_colors_and_preserves_symbols() {
        let mut canvas = Canvas::new(1, 2);
        canvas.cells_mut()[(0, 1)].symbol = Symbol::Edge(Orientation::Falling);

        let update = update_with(Symbol::Empty, [42, 43, 44]);
        canvas.apply(&update, MergeDescriptor::COLOR_EVERYWHERE);

        assert_eq!(canvas.cells()[(0, 1)].color, [42, 43, 44]);
        assert_eq!(
            canvas.cells()[(0, 1)].symbol,
            Symbol::Edge(Orientation::Falling)
        );
        assert_eq!(canvas.cells()[(0, 0)].symbol, Symbol::Empty);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "update grid shape differs")]
    fn test_mismatched_update_shape_asserts_in_debug() {
        let mut canvas = Canvas::new(2, 2);
        let update = update_with(Symbol::brightness(9), [1, 1, 1]);
        canvas.apply(&update, MergeDescriptor::SYMBOL_EVERYWHERE);
    }
}
