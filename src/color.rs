use egui::Color32;
use image::{Rgb, Rgba};

use crate::error::{PaintError, PaintResult};

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// The classic 28-swatch palette, top row then bottom row.
pub const DEFAULT_PALETTE: [&str; 28] = [
    "#000000", "#808080", "#800000", "#808000", "#008000", "#008080", "#000080",
    "#800080", "#808040", "#004040", "#0080FF", "#004080", "#8000FF", "#804000",
    "#FFFFFF", "#C0C0C0", "#FF0000", "#FFFF00", "#00FF00", "#00FFFF", "#0000FF",
    "#FF00FF", "#FFFF80", "#00FF80", "#80FFFF", "#8080FF", "#FF0080", "#FF8040",
];

/// Parses `#RRGGBB` (the leading `#` is optional).
///
/// Anything else is rejected rather than coerced to black.
pub fn parse_hex(input: &str) -> PaintResult<Rgb<u8>> {
    let invalid = || PaintError::InvalidColor(input.to_string());
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Formats a color as upper-case `#RRGGBB`.
pub fn to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parses a whole palette, failing on the first bad entry.
pub fn parse_palette<S: AsRef<str>>(entries: &[S]) -> PaintResult<Vec<Rgb<u8>>> {
    entries.iter().map(|entry| parse_hex(entry.as_ref())).collect()
}

pub fn opaque(color: Rgb<u8>) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, 255])
}

pub fn rgb_of(color: Rgba<u8>) -> Rgb<u8> {
    let [r, g, b, _] = color.0;
    Rgb([r, g, b])
}

pub fn to_color32(color: Rgb<u8>) -> Color32 {
    let [r, g, b] = color.0;
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex("#FF8040").unwrap(), Rgb([255, 128, 64]));
        assert_eq!(parse_hex("00ff80").unwrap(), Rgb([0, 255, 128]));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "#FFF", "#GGGGGG", "#1234567", "red", "#12 456", "#ÿÿÿ"] {
            assert_eq!(
                parse_hex(bad),
                Err(PaintError::InvalidColor(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn hex_formatting_matches_parsing() {
        let color = Rgb([1, 171, 255]);
        assert_eq!(to_hex(color), "#01ABFF");
        assert_eq!(parse_hex(&to_hex(color)).unwrap(), color);
    }

    #[test]
    fn default_palette_is_valid() {
        let palette = parse_palette(&DEFAULT_PALETTE).unwrap();
        assert_eq!(palette.len(), 28);
        assert_eq!(palette[0], BLACK);
        assert_eq!(palette[14], WHITE);
    }

    #[test]
    fn bad_palette_entry_is_reported() {
        let err = parse_palette(&["#000000", "nope"]).unwrap_err();
        assert_eq!(err, PaintError::InvalidColor("nope".to_string()));
    }
}
