//! Brightness quantization of block luminance
//!
//! Divides the `0..=255` luminance range by 28 and rounds, yielding the ten
//! brightness levels of the glyph ramp. Every input is classifiable; this
//! stage never fails.

use crate::classify::symbol::Symbol;
use crate::io::configuration::BRIGHTNESS_DIVISOR;
use crate::pipeline::canvas::Cell;
use ndarray::Array2;

/// Quantize a single luminance value into a brightness symbol
pub fn brightness_symbol(luminance: f64) -> Symbol {
    let level = (luminance / BRIGHTNESS_DIVISOR).round().clamp(0.0, 255.0) as u8;
    Symbol::brightness(level)
}

/// Classify every block of a luminance grid
///
/// Output colors are zero; the brightness merge policy never writes the
/// color field.
pub fn classify_brightness(luminance: &Array2<f64>) -> Array2<Cell> {
    luminance.map(|&value| Cell {
        symbol: brightness_symbol(value),
        color: [0, 0, 0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_endpoints_hit_the_ramp_ends() {
        assert_eq!(brightness_symbol(0.0), Symbol::Brightness(0));
        // round(255 / 28) = round(9.107) = 9
        assert_eq!(brightness_symbol(255.0), Symbol::Brightness(9));
    }

    #[test]
    fn test_levels_are_monotonic_in_luminance() {
        let mut previous = 0u8;
        for step in 0..=255 {
            let Symbol::Brightness(level) = brightness_symbol(f64::from(step)) else {
                unreachable!("brightness always yields a brightness symbol");
            };
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_grid_classification_is_elementwise() {
        let luminance = Array2::from_shape_vec((1, 3), vec![0.0, 140.0, 255.0])
            .unwrap_or_else(|e| unreachable!("shape: {e}"));
        let cells = classify_brightness(&luminance);
        assert_eq!(cells[(0, 0)].symbol, Symbol::Brightness(0));
        assert_eq!(cells[(0, 1)].symbol, Symbol::Brightness(5));
        assert_eq!(cells[(0, 2)].symbol, Symbol::Brightness(9));
        assert!(cells.iter().all(|cell| cell.color == [0, 0, 0]));
    }
}
