//! The closed symbol alphabet and its glyph table
//!
//! Fifteen codes exist: the empty marker, four edge orientations, and ten
//! brightness levels. Modeling them as a tagged enum keeps invalid codes
//! from ever reaching the glyph table.

use crate::io::configuration::MAX_BRIGHTNESS_LEVEL;

/// Edge orientation detected from the local gradient direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Vertical stroke, rendered `|`
    Vertical,
    /// Rising diagonal, rendered `/`
    Rising,
    /// Horizontal stroke, rendered `-`
    Horizontal,
    /// Falling diagonal, rendered `\`
    Falling,
}

/// Discrete symbol tag identifying which glyph a cell renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbol {
    /// No classification; renders as a blank and is skipped by merges that
    /// only write marked cells
    #[default]
    Empty,
    /// An edge glyph with its orientation
    Edge(Orientation),
    /// A brightness-ramp glyph, level 0 (darkest) through 9 (brightest)
    Brightness(u8),
}

impl Symbol {
    /// Brightness symbol for a level, clamped to the ten-level range
    pub const fn brightness(level: u8) -> Self {
        if level > MAX_BRIGHTNESS_LEVEL {
            Self::Brightness(MAX_BRIGHTNESS_LEVEL)
        } else {
            Self::Brightness(level)
        }
    }

    /// Whether this is the empty marker
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The printable glyph for this symbol
    ///
    /// Brightness levels map onto a density ramp from blank to `#`.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Edge(Orientation::Vertical) => '|',
            Self::Edge(Orientation::Rising) => '/',
            Self::Edge(Orientation::Horizontal) => '-',
            Self::Edge(Orientation::Falling) => '\\',
            Self::Brightness(0) => ' ',
            Self::Brightness(1) => '.',
            Self::Brightness(2) => ';',
            Self::Brightness(3) => 'c',
            Self::Brightness(4) => 'o',
            Self::Brightness(5) => 'P',
            Self::Brightness(6) => 'O',
            Self::Brightness(7) => '?',
            Self::Brightness(8) => '@',
            Self::Brightness(_) => '#',
        }
    }
}
