//! Parsing of `#RRGGBB` color specs into RGB triplets

use crate::io::error::{GlyphError, Result};

/// Parse a 7-character `#RRGGBB` hex string into an RGB triplet
///
/// # Errors
///
/// Returns [`GlyphError::InvalidColorFormat`] if the input is not exactly
/// seven characters, does not start with `#`, or contains non-hex digits.
pub fn parse_hex_color(spec: &str) -> Result<[u8; 3]> {
    let invalid = |reason: &str| GlyphError::InvalidColorFormat {
        input: spec.to_string(),
        reason: reason.to_string(),
    };

    if spec.len() != 7 {
        return Err(invalid("expected exactly 7 characters (#RRGGBB)"));
    }
    let digits = spec
        .strip_prefix('#')
        .ok_or_else(|| invalid("expected leading '#'"))?;

    let mut channels = [0u8; 3];
    for (index, channel) in channels.iter_mut().enumerate() {
        let pair = digits
            .get(index * 2..index * 2 + 2)
            .ok_or_else(|| invalid("channel digits are not ASCII hex"))?;
        *channel = u8::from_str_radix(pair, 16)
            .map_err(|e| invalid(&format!("channel digits are not hex: {e}")))?;
    }
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_range_channels() {
        assert_eq!(parse_hex_color("#000000").ok(), Some([0, 0, 0]));
        assert_eq!(parse_hex_color("#ffffff").ok(), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("#1A2b3C").ok(), Some([26, 43, 60]));
    }

    #[test]
    fn test_rejects_malformed_specs() {
        assert!(parse_hex_color("123456").is_err());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#12345678").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn test_rejects_multibyte_input_without_panicking() {
        assert!(parse_hex_color("#ééé").is_err());
    }
}
