//! # Font Metrics
//!
//! Advance widths used by the recording host to answer measure-text
//! queries. Easel does not rasterize glyphs. It only needs to know how wide
//! a string would be at a given size.
//!
//! Without a font, widths follow Unicode East Asian Width: narrow glyphs
//! take half an em, wide glyphs a full em. A TrueType/OpenType font can be
//! supplied instead for real advances.

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

use crate::error::EaselError;

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
}

impl CustomFontMetrics {
    /// Get the advance width of a character at `font_size`.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8]) -> Result<Self, EaselError> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| EaselError::Font(format!("Failed to parse font: {}", e)))?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Sample the BMP to build the width map
        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Ok(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }
}

/// Where text widths come from.
#[derive(Debug, Clone, Default)]
pub enum FontMetrics {
    /// Half an em per narrow glyph, a full em per wide glyph.
    #[default]
    Builtin,
    Custom(CustomFontMetrics),
}

impl FontMetrics {
    /// Load metrics from base64 font data or a `data:` URI.
    pub fn from_base64(src: &str) -> Result<Self, EaselError> {
        let bytes = decode_font_source(src)?;
        Ok(FontMetrics::Custom(CustomFontMetrics::from_font_data(&bytes)?))
    }

    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        match self {
            FontMetrics::Builtin => {
                let columns = ch.width().unwrap_or(0) as f64;
                columns * 0.5 * font_size
            }
            FontMetrics::Custom(metrics) => metrics.char_width(ch, font_size),
        }
    }

    /// Width of `text` on a single line.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

fn decode_font_source(src: &str) -> Result<Vec<u8>, EaselError> {
    use base64::Engine;

    // Data URI: data:font/ttf;base64,AAEAAA...
    let payload = if src.starts_with("data:") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| EaselError::Font("Invalid data URI: missing comma".to_string()))?;
        &src[comma_pos + 1..]
    } else {
        src
    };

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| EaselError::Font(format!("Base64 decode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_narrow_and_wide() {
        let metrics = FontMetrics::Builtin;
        assert_eq!(metrics.char_width('a', 12.0), 6.0);
        assert_eq!(metrics.char_width('中', 12.0), 12.0);
        assert_eq!(metrics.measure_string("ab中", 10.0), 20.0);
    }

    #[test]
    fn test_custom_metrics_fallback_advance() {
        let metrics = CustomFontMetrics {
            units_per_em: 1000,
            advance_widths: HashMap::from([('a', 500)]),
            default_advance: 250,
        };
        assert_eq!(metrics.char_width('a', 10.0), 5.0);
        assert_eq!(metrics.char_width('z', 10.0), 2.5);
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            FontMetrics::from_base64("not base64!!"),
            Err(EaselError::Font(_))
        ));
    }

    #[test]
    fn test_data_uri_missing_comma() {
        assert!(FontMetrics::from_base64("data:font/ttf;base64").is_err());
    }

    #[test]
    fn test_valid_base64_but_not_a_font() {
        // "hello world" in base64
        let err = FontMetrics::from_base64("aGVsbG8gd29ybGQ=").unwrap_err();
        assert!(err.to_string().contains("Failed to parse font"));
    }
}
