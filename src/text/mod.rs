//! # Text Metrics
//!
//! Width estimation for mixed half-width/full-width text and the greedy
//! character wrap planner.
//!
//! Two different notions of width live here and they must not be mixed up:
//!
//! - [`measure_length`] is a coarse count of "full-width character
//!   equivalents". It needs no font and backs [`text_height`], which lets
//!   callers size things before anything is drawn.
//! - [`plan_lines`] takes the host's own measurement as a closure. That is
//!   the authoritative width used when text is actually wrapped.

use serde::{Deserialize, Serialize};

/// Width cost of `text` in full-width character equivalents.
///
/// Every UTF-16 code unit in U+0001..=U+007E (printable ASCII and control
/// characters) or U+FF60..=U+FF9F (half-width Katakana and punctuation)
/// costs one half; everything else costs a full unit. The half-unit total
/// is rounded up.
pub fn measure_length(text: &str) -> u32 {
    let halves: u32 = text
        .encode_utf16()
        .map(|unit| if is_half_width(unit) { 1 } else { 2 })
        .sum();
    halves.div_ceil(2)
}

fn is_half_width(unit: u16) -> bool {
    (0x0001..=0x007E).contains(&unit) || (0xFF60..=0xFF9F).contains(&unit)
}

/// Inputs for [`text_height`]. Missing JSON fields take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextHeightParams {
    pub text: String,
    /// Wrap width in authored units. Zero or less disables wrapping.
    pub width: f64,
    pub line_height: f64,
    pub font_size: f64,
    pub scale: f64,
}

impl Default for TextHeightParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            width: 0.0,
            line_height: 0.0,
            font_size: 12.0,
            scale: 1.0,
        }
    }
}

/// Estimate the height of a wrapped text block without a drawing host.
///
/// Rows are estimated from [`measure_length`] at one font size per
/// full-width character. Each row takes `font_size + line_height`, scaled,
/// and the trailing line gap is dropped. Never negative.
pub fn text_height(params: &TextHeightParams) -> f64 {
    let length = measure_length(&params.text) as f64;
    if length == 0.0 {
        return 0.0;
    }

    let text_width = length * params.font_size;
    let rows = if params.width > 0.0 {
        (text_width / params.width).ceil()
    } else {
        1.0
    };

    let height = rows * (params.line_height + params.font_size) * params.scale - params.line_height;
    height.max(0.0)
}

/// Break `text` into lines that fit within `width`.
///
/// Greedy, one character at a time: a character joins the current line
/// while `measure` of the extended line stays below `width`. The first
/// character that would bring it to `width` or beyond starts the next line
/// instead. Every line gets at least one character, so glyphs wider than
/// the budget (or a non-positive budget) still make progress. The final
/// line is always emitted, which means empty text yields one empty line.
pub fn plan_lines<F>(text: &str, width: f64, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for ch in text.chars() {
        if line.is_empty() {
            line.push(ch);
            continue;
        }

        line.push(ch);
        if measure(&line) >= width {
            line.pop();
            lines.push(std::mem::take(&mut line));
            line.push(ch);
        }
    }

    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(per_char: f64) -> impl FnMut(&str) -> f64 {
        move |s: &str| s.chars().count() as f64 * per_char
    }

    #[test]
    fn test_measure_length_empty() {
        assert_eq!(measure_length(""), 0);
    }

    #[test]
    fn test_measure_length_ascii_rounds_up() {
        assert_eq!(measure_length("a"), 1);
        assert_eq!(measure_length("ab"), 1);
        assert_eq!(measure_length("abc"), 2);
    }

    #[test]
    fn test_measure_length_full_width() {
        assert_eq!(measure_length("中文"), 2);
        assert_eq!(measure_length("中a"), 2);
        assert_eq!(measure_length("中ab"), 2);
    }

    #[test]
    fn test_measure_length_half_width_katakana() {
        // U+FF71 HALFWIDTH KATAKANA LETTER A
        assert_eq!(measure_length("\u{FF71}\u{FF71}"), 1);
        // U+30A2 KATAKANA LETTER A (full-width)
        assert_eq!(measure_length("\u{30A2}"), 1);
        assert_eq!(measure_length("\u{30A2}\u{30A2}"), 2);
    }

    #[test]
    fn test_measure_length_counts_surrogates() {
        // Outside the BMP: two UTF-16 units, each full-width.
        assert_eq!(measure_length("😀"), 2);
    }

    #[test]
    fn test_measure_length_monotone_under_concatenation() {
        let pieces = ["a", "中", "b", "\u{FF71}", " ", "文", "zz"];
        let mut text = String::new();
        let mut previous = 0;
        for piece in pieces {
            text.push_str(piece);
            let current = measure_length(&text);
            assert!(current >= previous, "{text:?} shrank");
            previous = current;
        }
    }

    #[test]
    fn test_text_height_empty_text() {
        let params = TextHeightParams::default();
        assert_eq!(text_height(&params), 0.0);
    }

    #[test]
    fn test_text_height_rows() {
        // 20 ASCII chars = 10 full-width units * 12 = 120 wide -> 2 rows in 100
        let params = TextHeightParams {
            text: "a".repeat(20),
            width: 100.0,
            line_height: 4.0,
            font_size: 12.0,
            scale: 1.0,
        };
        assert_eq!(text_height(&params), 2.0 * 16.0 - 4.0);
    }

    #[test]
    fn test_text_height_scales() {
        let params = TextHeightParams {
            text: "中文".to_string(),
            width: 100.0,
            line_height: 2.0,
            font_size: 10.0,
            scale: 2.0,
        };
        assert_eq!(text_height(&params), 1.0 * 12.0 * 2.0 - 2.0);
    }

    #[test]
    fn test_text_height_without_width_is_one_row() {
        let params = TextHeightParams {
            text: "a long line of text".to_string(),
            font_size: 10.0,
            ..Default::default()
        };
        assert_eq!(text_height(&params), 10.0);
    }

    #[test]
    fn test_text_height_params_from_json() {
        let params: TextHeightParams = serde_json::from_str(r#"{ "text": "ab", "lineHeight": 3 }"#).unwrap();
        assert_eq!(params.font_size, 12.0);
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.line_height, 3.0);
    }

    #[test]
    fn test_plan_lines_empty_text() {
        assert_eq!(plan_lines("", 100.0, fixed(10.0)), vec![String::new()]);
    }

    #[test]
    fn test_plan_lines_fits_on_one_line() {
        let lines = plan_lines("hello", 100.0, fixed(10.0));
        assert_eq!(lines, vec!["hello"]);
    }

    #[test]
    fn test_plan_lines_splits_at_first_overflow() {
        // Three chars measure 30 < 35, the fourth would measure 40.
        let lines = plan_lines("abcdef", 35.0, fixed(10.0));
        assert_eq!(lines, vec!["abc", "def"]);
    }

    #[test]
    fn test_plan_lines_reaching_width_counts_as_overflow() {
        let lines = plan_lines("abcd", 30.0, fixed(10.0));
        assert_eq!(lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_plan_lines_oversized_glyph_still_progresses() {
        let lines = plan_lines("abc", 5.0, fixed(10.0));
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_plan_lines_zero_width() {
        let lines = plan_lines("ab", 0.0, fixed(10.0));
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_plan_lines_mixed_width_measurer() {
        let measure = |s: &str| -> f64 {
            s.chars()
                .map(|c| if c.is_ascii() { 5.0 } else { 10.0 })
                .sum()
        };
        let lines = plan_lines("ab中文cd", 25.0, measure);
        assert_eq!(lines, vec!["ab中", "文cd"]);
    }

    #[test]
    fn test_plan_lines_preserves_all_characters() {
        let text = "The quick brown fox jumps over the lazy dog";
        let lines = plan_lines(text, 47.0, fixed(6.0));
        assert_eq!(lines.concat(), text);
        assert!(lines.iter().all(|l| l.chars().count() <= 7));
    }
}
